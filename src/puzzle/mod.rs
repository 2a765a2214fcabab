//! The move execution engine: cube state, move notation, and the twist
//! animation state machine.

pub mod animator;
pub mod cubie;
pub mod notation;
pub mod orientation;
pub mod sign;
pub mod state;

mod controller;

pub use animator::{TwistAnimator, TwistError};
pub use controller::CubeController;
pub use cubie::Cubie;
pub use notation::{parse_algorithm, Face, ParseTwistError, Twist};
pub use orientation::{Coord, Orientation, SignedAxis};
pub use sign::{Axis, Sign};
pub use state::{CubeState, CubieId, LayerCubies};
