//! Puzzle wrapper that ties the cube state, the animator, and a move queue
//! together behind one frame-driven interface.

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

use crate::prefs::Preferences;
use crate::scene::Scene;

use super::animator::{TwistAnimator, TwistError};
use super::notation::{self, Twist};
use super::state::CubeState;

/// Owns a scene and a cube inside it, and executes moves against them.
///
/// Everything is cooperatively scheduled: the embedding render loop calls
/// [`CubeController::frame`] once per rendered frame, and queued moves run
/// strictly sequentially, each starting only after the previous one has
/// committed.
#[derive(Debug)]
pub struct CubeController<S: Scene> {
    scene: S,
    prefs: Preferences,
    state: CubeState,
    animator: TwistAnimator,
    /// Moves waiting for the animator to go idle.
    queue: VecDeque<Twist>,
}
impl<S: Scene> CubeController<S> {
    /// Builds a solved cube in the given scene.
    pub fn new(mut scene: S, prefs: Preferences) -> Self {
        let state = CubeState::new(&mut scene, &prefs);
        Self {
            scene,
            prefs,
            state,
            animator: TwistAnimator::new(),
            queue: VecDeque::new(),
        }
    }

    /// Returns the cube state.
    pub fn state(&self) -> &CubeState {
        &self.state
    }
    /// Returns the scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }
    /// Returns the scene mutably, for the embedding renderer.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
    /// Returns the preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Returns whether a twist animation is in flight.
    pub fn is_animating(&self) -> bool {
        !self.animator.is_idle()
    }
    /// Returns whether the controller is animating or has moves queued.
    ///
    /// UI affordances that mutate the cube (shuffle, reset) must stay disabled
    /// while this is true.
    pub fn is_busy(&self) -> bool {
        !self.animator.is_idle() || !self.queue.is_empty()
    }

    /// Parses and immediately starts animating a single move token.
    ///
    /// Parse errors surface synchronously, before any animation starts; a
    /// move issued while the controller is busy is rejected, not queued.
    pub fn twist(&mut self, token: &str) -> Result<(), TwistError> {
        let twist: Twist = token.parse()?;
        if self.is_busy() {
            return Err(TwistError::AnimationInProgress);
        }
        self.animator.begin(&mut self.scene, &self.state, twist)
    }

    /// Parses a whitespace-separated algorithm (e.g. `"R U R' U2"`) and
    /// queues it for sequential execution.
    pub fn apply_algorithm(&mut self, algorithm: &str) -> Result<(), TwistError> {
        let twists = notation::parse_algorithm(algorithm)?;
        if self.is_busy() {
            return Err(TwistError::AnimationInProgress);
        }
        self.queue.extend(twists);
        Ok(())
    }

    /// Queues `n` uniformly random moves from the 18-token alphabet.
    ///
    /// No move-sequence filtering is applied; immediately-canceling pairs are
    /// allowed.
    pub fn shuffle(&mut self, n: usize, rng: &mut impl Rng) -> Result<(), TwistError> {
        if self.is_busy() {
            return Err(TwistError::AnimationInProgress);
        }
        self.queue.extend((0..n).map(|_| Twist::from_rng(rng)));
        log::info!("shuffling with {n} moves");
        Ok(())
    }

    /// Advances the animation by one frame's time delta and, once the
    /// animator is idle, starts the next queued move.
    pub fn frame(&mut self, delta: Duration) {
        self.animator
            .advance(&mut self.scene, &mut self.state, delta, &self.prefs);
        if self.animator.is_idle() {
            if let Some(twist) = self.queue.pop_front() {
                if let Err(e) = self.animator.begin(&mut self.scene, &self.state, twist) {
                    // Unreachable: the animator was just observed idle.
                    log::error!("failed to start queued twist {twist}: {e}");
                }
            }
        }
    }

    /// Tears the cube down and rebuilds it solved, discarding all history.
    ///
    /// Rejected while a shuffle or twist is still executing, so a commit in
    /// flight can never observe a rebuilt cube.
    pub fn reset(&mut self) -> Result<(), TwistError> {
        if self.is_busy() {
            return Err(TwistError::AnimationInProgress);
        }
        self.scene.remove(self.state.root());
        self.state = CubeState::new(&mut self.scene, &self.prefs);
        log::info!("cube reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::scene::SceneGraph;

    use super::*;

    fn controller() -> CubeController<SceneGraph> {
        CubeController::new(SceneGraph::new(), Preferences::default())
    }

    fn drain(controller: &mut CubeController<SceneGraph>) {
        let frame = Duration::from_millis(16);
        let mut frames = 0;
        while controller.is_busy() {
            controller.frame(frame);
            frames += 1;
            assert!(frames < 100_000, "controller failed to go idle");
        }
    }

    #[test]
    fn test_twist_rejected_while_busy() {
        let mut controller = controller();
        controller.twist("U").expect("controller is idle");
        assert!(controller.is_animating());
        assert_eq!(
            Err(TwistError::AnimationInProgress),
            controller.twist("R"),
        );
        drain(&mut controller);
        controller.twist("R").expect("controller is idle again");
    }

    #[test]
    fn test_shuffle_executes_sequentially() {
        let mut controller = controller();
        let mut rng = StdRng::seed_from_u64(5);
        controller.shuffle(15, &mut rng).expect("controller is idle");
        assert!(controller.is_busy());
        assert_eq!(
            Err(TwistError::AnimationInProgress),
            controller.shuffle(15, &mut rng),
        );
        assert_eq!(Err(TwistError::AnimationInProgress), controller.reset());
        drain(&mut controller);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut controller = controller();
        let solved: Vec<_> = controller.state().cubies().to_vec();

        let mut rng = StdRng::seed_from_u64(99);
        controller.shuffle(20, &mut rng).expect("controller is idle");
        drain(&mut controller);
        assert_ne!(
            solved.iter().map(|c| (c.coord, c.orientation)).collect::<Vec<_>>(),
            controller
                .state()
                .cubies()
                .iter()
                .map(|c| (c.coord, c.orientation))
                .collect::<Vec<_>>(),
        );

        controller.reset().expect("controller is idle");
        for cubie in controller.state().cubies() {
            assert_eq!(
                crate::puzzle::Orientation::IDENTITY,
                cubie.orientation,
            );
        }
        assert_eq!(
            solved.iter().map(|c| c.coord).collect::<Vec<_>>(),
            controller
                .state()
                .cubies()
                .iter()
                .map(|c| c.coord)
                .collect::<Vec<_>>(),
        );
    }

    #[test]
    fn test_apply_algorithm_round_trip() {
        let mut controller = controller();
        let solved: Vec<_> = controller.state().cubies().to_vec();

        controller
            .apply_algorithm("R U R' U'")
            .expect("controller is idle");
        drain(&mut controller);
        assert_ne!(solved, controller.state().cubies());

        // The inverse algorithm undoes it exactly.
        controller
            .apply_algorithm("U R U' R'")
            .expect("controller is idle");
        drain(&mut controller);
        assert_eq!(solved, controller.state().cubies());
    }
}
