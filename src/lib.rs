//! Animated 3x3x3 twisty puzzle simulator core.
//!
//! The cube is modeled as 26 independently rotatable cubies on an integer
//! lattice. Face-turn moves in standard notation (`U`, `R'`, `F2`, ...) are
//! resolved to a rotation axis, a layer, and a signed quarter-turn count,
//! animated over time against an abstract scene graph, and then committed
//! back into the integer model exactly, so the cube stays a rigid lattice of
//! 90-degree-aligned cubies no matter how many moves are applied.
//!
//! Rendering is out of scope: implement [`Scene`] on top of a real renderer
//! and call [`CubeController::frame`] from its frame callback. The bundled
//! [`SceneGraph`] is a reference implementation of that boundary.

pub mod prefs;
pub mod puzzle;
pub mod scene;

pub use prefs::Preferences;
pub use puzzle::{
    Axis, Coord, CubeController, CubeState, Cubie, CubieId, Face, Orientation, ParseTwistError,
    Sign, Twist, TwistAnimator, TwistError,
};
pub use scene::{Color, NodeId, Scene, SceneGraph, Transform};
