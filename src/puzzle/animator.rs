//! Twist animation state machine.
//!
//! A twist goes `Idle -> Animating -> (commit) -> Idle`. While animating, the
//! affected cubies hang off a temporary pivot node that is rotated about the
//! twist axis in eased increments. The commit step detaches them, applies the
//! exact integer turn to the cube state, and snaps every node back onto the
//! canonical transform derived from that state, so floating-point drift can
//! never accumulate across moves.

use std::time::Duration;

use cgmath::Rad;
use thiserror::Error;

use crate::prefs::Preferences;
use crate::scene::{NodeId, Scene, Transform};

use super::notation::{ParseTwistError, Twist};
use super::state::{CubeState, LayerCubies};

/// Error produced when a twist cannot be issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwistError {
    /// The move token did not parse.
    #[error(transparent)]
    Parse(#[from] ParseTwistError),
    /// A twist animation is already in progress; at most one twist may be
    /// animating at a time.
    #[error("a twist animation is already in progress")]
    AnimationInProgress,
}

// Ease-out curve; monotonic on [0, 1] with ease(0) = 0 and ease(1) = 1.
const EASE: fn(f32) -> f32 = |p| p * (2.0 - p);

#[derive(Debug)]
struct ActiveTwist {
    twist: Twist,
    cubies: LayerCubies,
    pivot: NodeId,
    /// Animation progress, from 0.0 to 1.0.
    progress: f32,
    /// Eased angle already applied to the pivot, in radians.
    applied_angle: f32,
}

/// Drives one twist animation at a time and commits the result into the cube
/// state.
#[derive(Debug, Default)]
pub struct TwistAnimator {
    active: Option<ActiveTwist>,
}
impl TwistAnimator {
    /// Constructs an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no twist is currently animating.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }
    /// Returns the twist currently being animated, along with its progress
    /// from 0.0 to 1.0.
    pub fn current_twist(&self) -> Option<(Twist, f32)> {
        self.active
            .as_ref()
            .map(|active| (active.twist, active.progress))
    }

    /// Starts animating a twist: gathers the layer's cubies and groups them
    /// under a fresh pivot, preserving each cubie's world transform.
    ///
    /// A twist whose layer selects no cubies completes immediately as a no-op.
    /// Fails if a twist is already animating; serializing moves is the
    /// caller's job.
    pub fn begin(
        &mut self,
        scene: &mut impl Scene,
        state: &CubeState,
        twist: Twist,
    ) -> Result<(), TwistError> {
        if self.active.is_some() {
            return Err(TwistError::AnimationInProgress);
        }

        let cubies = state.cubies_in_layer(twist.axis, twist.layer);
        if cubies.is_empty() {
            log::debug!("twist {twist} selects no cubies; skipping");
            return Ok(());
        }

        let pivot = scene.create_node(scene.root(), Transform::identity());
        for &id in &cubies {
            scene.attach(state.cubie(id).node, pivot);
        }
        log::debug!("animating twist {twist} ({} cubies)", cubies.len());

        self.active = Some(ActiveTwist {
            twist,
            cubies,
            pivot,
            progress: 0.0,
            applied_angle: 0.0,
        });
        Ok(())
    }

    /// Advances the animation by the given time delta, committing the twist
    /// when it completes. Does nothing while idle.
    pub fn advance(
        &mut self,
        scene: &mut impl Scene,
        state: &mut CubeState,
        delta: Duration,
        prefs: &Preferences,
    ) {
        let Some(active) = &mut self.active else {
            return;
        };

        // An arbitrarily large (or degenerate) step clamps to 1, so the
        // animation always converges.
        let step = delta.as_secs_f32() / prefs.twist_duration;
        active.progress = match step.is_finite() && step >= 0.0 {
            true => (active.progress + step).min(1.0),
            false => 1.0,
        };

        // Apply the increment since the last frame rather than an absolute
        // angle, so rotation composes with whatever the pivot has accumulated.
        let angle = active.twist.total_angle() * EASE(active.progress);
        let axis = active.twist.axis.unit_vec();
        scene.rotate_about_world_axis(active.pivot, axis, Rad(angle - active.applied_angle));
        active.applied_angle = angle;

        if active.progress >= 1.0 {
            if let Some(active) = self.active.take() {
                commit(scene, state, prefs, active);
            }
        }
    }
}

/// Detaches the turned cubies from the pivot, applies the exact integer turn
/// to the cube state, and re-quantizes every node transform from the logical
/// state.
fn commit(scene: &mut impl Scene, state: &mut CubeState, prefs: &Preferences, active: ActiveTwist) {
    let ActiveTwist {
        twist,
        cubies,
        pivot,
        ..
    } = active;

    for &id in &cubies {
        scene.attach(state.cubie(id).node, state.root());
    }

    // The integer descriptor, never anything derived from the float
    // transforms, decides the new lattice assignment.
    state.commit_turn(&cubies, twist.axis, twist.quarter_turns);

    let offset = prefs.position_offset();
    for &id in &cubies {
        let cubie = state.cubie(id);
        debug_assert!(
            {
                use cgmath::InnerSpace;
                let world = scene.world_transform(cubie.node);
                let rest = cubie.rest_transform(offset);
                (world.position - rest.position).magnitude() < 1e-3
                    && (world.rotation - rest.rotation).magnitude().min(
                        (world.rotation + rest.rotation).magnitude(),
                    ) < 1e-3
            },
            "render transform drifted away from the lattice before snapping",
        );
        scene.set_transform(cubie.node, cubie.rest_transform(offset));
    }

    scene.remove(pivot);
    log::debug!("committed twist {twist}");
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::scene::SceneGraph;
    use crate::puzzle::sign::{Axis, Sign};

    use super::*;

    fn setup() -> (SceneGraph, CubeState, TwistAnimator, Preferences) {
        let prefs = Preferences::default();
        let mut scene = SceneGraph::new();
        let state = CubeState::new(&mut scene, &prefs);
        (scene, state, TwistAnimator::new(), prefs)
    }

    fn twist(token: &str) -> Twist {
        token.parse().expect("valid token")
    }

    #[test]
    fn test_rejects_concurrent_twists() {
        let (mut scene, state, mut animator, _prefs) = setup();
        animator
            .begin(&mut scene, &state, twist("U"))
            .expect("animator is idle");
        assert_eq!(
            Err(TwistError::AnimationInProgress),
            animator.begin(&mut scene, &state, twist("R")),
        );
    }

    #[test]
    fn test_runs_to_completion_and_snaps() {
        let (mut scene, mut state, mut animator, prefs) = setup();
        let before = state.cubies().to_vec();

        animator
            .begin(&mut scene, &state, twist("U"))
            .expect("animator is idle");
        assert!(!animator.is_idle());

        let frame = Duration::from_millis(16);
        let mut frames = 0;
        while !animator.is_idle() {
            animator.advance(&mut scene, &mut state, frame, &prefs);
            frames += 1;
            assert!(frames < 1000, "animation failed to converge");
        }

        // The pivot is gone and the cube permuted.
        // Scene root + cube root + 26 cubies.
        assert_eq!(28, scene.node_count());
        assert_ne!(before, state.cubies());

        // Every node transform is exactly the canonical one.
        let offset = prefs.position_offset();
        for cubie in state.cubies() {
            let world = scene.world_transform(cubie.node);
            let rest = cubie.rest_transform(offset);
            assert_relative_eq!(rest.position, world.position, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_huge_frame_delta_still_converges() {
        let (mut scene, mut state, mut animator, prefs) = setup();
        animator
            .begin(&mut scene, &state, twist("R2"))
            .expect("animator is idle");
        animator.advance(&mut scene, &mut state, Duration::from_secs(3600), &prefs);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_middle_layer_descriptor() {
        // Not expressible as a face token, but a valid descriptor.
        let (mut scene, mut state, mut animator, prefs) = setup();
        let before = state.cubies().to_vec();

        let descriptor = Twist {
            axis: Axis::Y,
            layer: Sign::Zero,
            quarter_turns: 1,
        };
        animator
            .begin(&mut scene, &state, descriptor)
            .expect("animator is idle");
        while !animator.is_idle() {
            animator.advance(&mut scene, &mut state, Duration::from_millis(16), &prefs);
        }
        assert_ne!(before, state.cubies());

        animator
            .begin(&mut scene, &state, descriptor.rev())
            .expect("animator is idle");
        while !animator.is_idle() {
            animator.advance(&mut scene, &mut state, Duration::from_millis(16), &prefs);
        }
        assert_eq!(before, state.cubies());
    }
}
