//! End-to-end properties of the move engine, driven through the animated path
//! against the reference scene graph.

use std::time::Duration;

use approx::assert_relative_eq;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quarterturn::{Coord, CubeController, Orientation, Preferences, Scene, SceneGraph};

const FRAME: Duration = Duration::from_millis(16);

fn new_controller() -> CubeController<SceneGraph> {
    CubeController::new(SceneGraph::new(), Preferences::default())
}

/// Runs queued/active animations to completion, frame by frame.
fn drain(controller: &mut CubeController<SceneGraph>) {
    let mut frames = 0;
    while controller.is_busy() {
        controller.frame(FRAME);
        frames += 1;
        assert!(frames < 1_000_000, "engine failed to go idle");
    }
}

/// Animates a single move token to completion.
fn run_move(controller: &mut CubeController<SceneGraph>, token: &str) {
    controller.twist(token).expect("controller should be idle");
    drain(controller);
}

fn lattice(controller: &CubeController<SceneGraph>) -> Vec<Coord> {
    controller
        .state()
        .cubies()
        .iter()
        .map(|cubie| cubie.coord)
        .sorted()
        .collect()
}

fn logical_state(controller: &CubeController<SceneGraph>) -> Vec<(Coord, Orientation)> {
    controller
        .state()
        .cubies()
        .iter()
        .map(|cubie| (cubie.coord, cubie.orientation))
        .collect()
}

#[test]
fn lattice_closure_over_long_sequences() {
    let mut controller = new_controller();
    let initial = lattice(&controller);

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..5 {
        controller
            .shuffle(20, &mut rng)
            .expect("controller should be idle");
        drain(&mut controller);
        assert_eq!(initial, lattice(&controller));
    }
}

#[test]
fn inverse_cancellation_for_every_face() {
    let mut controller = new_controller();
    let solved = logical_state(&controller);

    for face in ["U", "D", "L", "R", "F", "B"] {
        // X then X'.
        run_move(&mut controller, face);
        run_move(&mut controller, &format!("{face}'"));
        assert_eq!(solved, logical_state(&controller), "{face} {face}'");

        // X four times.
        for _ in 0..4 {
            run_move(&mut controller, face);
        }
        assert_eq!(solved, logical_state(&controller), "{face} x4");

        // X2 twice.
        for _ in 0..2 {
            run_move(&mut controller, &format!("{face}2"));
        }
        assert_eq!(solved, logical_state(&controller), "{face}2 {face}2");
    }
}

#[test]
fn orientations_stay_on_the_rotation_group() {
    let mut controller = new_controller();
    let mut rng = StdRng::seed_from_u64(7);
    controller
        .shuffle(40, &mut rng)
        .expect("controller should be idle");
    drain(&mut controller);

    // Every cubie's render rotation quantizes back onto the discrete group
    // and agrees with the logical orientation.
    for cubie in controller.state().cubies() {
        let world = controller.scene().world_transform(cubie.node);
        let quantized = Orientation::from_matrix(cgmath::Matrix3::from(world.rotation))
            .expect("world rotation should be a 90-degree-aligned rotation");
        assert_eq!(cubie.orientation, quantized);
    }
}

#[test]
fn render_transforms_match_the_lattice_at_rest() {
    let mut controller = new_controller();
    let mut rng = StdRng::seed_from_u64(11);
    controller
        .shuffle(30, &mut rng)
        .expect("controller should be idle");
    drain(&mut controller);

    let offset = controller.prefs().position_offset();
    for cubie in controller.state().cubies() {
        let world = controller.scene().world_transform(cubie.node);
        assert_relative_eq!(
            cubie.coord.to_position(offset),
            world.position,
            epsilon = 1e-6,
        );
    }
}

#[test]
fn seeded_shuffles_are_reproducible() {
    let final_state = |seed: u64| {
        let mut controller = new_controller();
        let mut rng = StdRng::seed_from_u64(seed);
        controller
            .shuffle(25, &mut rng)
            .expect("controller should be idle");
        drain(&mut controller);
        logical_state(&controller)
    };

    assert_eq!(final_state(42), final_state(42));
    assert_ne!(final_state(42), final_state(43));
}

#[test]
fn reset_is_idempotent_regardless_of_history() {
    let mut controller = new_controller();
    let solved = logical_state(&controller);

    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..3 {
        controller
            .shuffle(15, &mut rng)
            .expect("controller should be idle");
        drain(&mut controller);
        controller.reset().expect("controller should be idle");
        assert_eq!(solved, logical_state(&controller));
        controller.reset().expect("controller should be idle");
        assert_eq!(solved, logical_state(&controller));
    }
}

#[test]
fn scene_stays_clean_of_pivots() {
    let mut controller = new_controller();
    // Root + cube root + 26 cubies.
    let baseline = controller.scene().node_count();

    let mut rng = StdRng::seed_from_u64(3);
    controller
        .shuffle(10, &mut rng)
        .expect("controller should be idle");
    drain(&mut controller);
    assert_eq!(baseline, controller.scene().node_count());

    controller.reset().expect("controller should be idle");
    assert_eq!(baseline, controller.scene().node_count());
}
