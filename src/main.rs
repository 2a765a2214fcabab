//! Headless demo driver: shuffles a cube at a fixed timestep, then resets it.
//!
//! Pass a number as the first argument to seed the shuffle.

use std::time::Duration;

use quarterturn::{CubeController, Preferences, SceneGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let prefs = Preferences::default();
    let mut controller = CubeController::new(SceneGraph::new(), prefs);

    let mut rng = match std::env::args().nth(1).and_then(|arg| arg.parse().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    controller
        .shuffle(prefs.shuffle_length, &mut rng)
        .expect("fresh controller is idle");

    // 60 FPS timestep.
    let frame = Duration::from_micros(16_667);
    let mut frames = 0u32;
    while controller.is_busy() {
        controller.frame(frame);
        frames += 1;
    }
    log::info!(
        "shuffle of {} moves finished in {frames} frames",
        prefs.shuffle_length
    );

    controller.reset().expect("controller drained");
    log::info!("cube reset to solved");
}
