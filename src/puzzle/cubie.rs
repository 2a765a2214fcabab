//! The smallest addressable unit of the puzzle.

use crate::scene::{Color, NodeId, Transform};

use super::orientation::{Coord, Orientation};
use super::sign::{Axis, Sign};

/// Sticker colors, matching the common color scheme: white up, yellow down,
/// red right, orange left, blue front, green back.
pub mod colors {
    use crate::scene::Color;

    pub const WHITE: Color = [0xff, 0xff, 0xff];
    pub const YELLOW: Color = [0xff, 0xd5, 0x00];
    pub const RED: Color = [0xcc, 0x00, 0x00];
    pub const ORANGE: Color = [0xff, 0x58, 0x00];
    pub const BLUE: Color = [0x00, 0x46, 0xad];
    pub const GREEN: Color = [0x00, 0x9b, 0x48];
}

/// One of the 26 small cubes composing the puzzle.
///
/// The lattice coordinate is the cubie's identity: it names the slot the cubie
/// currently occupies. The orientation accumulates the turns applied to it.
/// Both are integer-exact; the scene node is presentation only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cubie {
    /// Logical lattice slot.
    pub coord: Coord,
    /// Accumulated rotation, always one of the 24 cube rotations.
    pub orientation: Orientation,
    /// Handle to the renderable box in the scene.
    pub node: NodeId,
}
impl Cubie {
    /// Returns the canonical at-rest transform for this cubie, relative to the
    /// cube root. `offset` is the distance between adjacent lattice slots.
    pub fn rest_transform(&self, offset: f32) -> Transform {
        Transform {
            position: self.coord.to_position(offset),
            rotation: self.orientation.to_quaternion(),
        }
    }
}

/// Returns the sticker colors for the cubie at `coord`, in `+X, -X, +Y, -Y,
/// +Z, -Z` order. Inward faces get no sticker.
pub fn sticker_colors(coord: Coord) -> [Option<Color>; 6] {
    let sticker = |axis: Axis, sign: Sign, color: Color| (coord[axis] == sign).then_some(color);
    [
        sticker(Axis::X, Sign::Pos, colors::RED),
        sticker(Axis::X, Sign::Neg, colors::ORANGE),
        sticker(Axis::Y, Sign::Pos, colors::WHITE),
        sticker(Axis::Y, Sign::Neg, colors::YELLOW),
        sticker(Axis::Z, Sign::Pos, colors::BLUE),
        sticker(Axis::Z, Sign::Neg, colors::GREEN),
    ]
}
