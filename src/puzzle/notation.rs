//! Face-turn move notation.
//!
//! The complete grammar is a face letter (`U`, `D`, `L`, `R`, `F`, `B`)
//! followed by an optional modifier: `'` for the inverse turn, `2` for a
//! double turn. Whitespace-separated sequences of tokens form algorithms.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use strum::{Display, EnumIter};
use thiserror::Error;

use super::sign::{Axis, Sign};

/// Error produced when parsing a move token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTwistError {
    /// Unrecognized face letter or modifier.
    #[error("unrecognized move token {0:?}")]
    InvalidToken(String),
}

/// A face of the cube, named from the solver's point of view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Face {
    /// Up.
    U,
    /// Down.
    D,
    /// Left.
    L,
    /// Right.
    R,
    /// Front.
    F,
    /// Back.
    B,
}
impl Face {
    /// All six faces.
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    /// Returns the face named by the given letter.
    pub fn from_char(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }
    /// Returns the face whose layer lies at `layer` along `axis`, if any.
    pub fn from_axis_layer(axis: Axis, layer: Sign) -> Option<Face> {
        match (axis, layer) {
            (Axis::Y, Sign::Pos) => Some(Face::U),
            (Axis::Y, Sign::Neg) => Some(Face::D),
            (Axis::X, Sign::Neg) => Some(Face::L),
            (Axis::X, Sign::Pos) => Some(Face::R),
            (Axis::Z, Sign::Pos) => Some(Face::F),
            (Axis::Z, Sign::Neg) => Some(Face::B),
            (_, Sign::Zero) => None,
        }
    }

    /// Returns the axis perpendicular to this face.
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::Y,
            Face::L | Face::R => Axis::X,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns the layer value of this face along its axis.
    pub fn layer(self) -> Sign {
        match self {
            Face::U | Face::R | Face::F => Sign::Pos,
            Face::D | Face::L | Face::B => Sign::Neg,
        }
    }
    /// Returns the signed quarter-turn count of an unmodified turn of this
    /// face.
    ///
    /// The sign is chosen so that every unmodified turn is clockwise when
    /// sighted from outside the face: `-1` for positive faces, `+1` for
    /// negative ones.
    pub fn base_direction(self) -> i8 {
        -self.layer().int()
    }
}

/// A fully resolved face-turn move: the rotation axis, the layer to turn, and
/// a signed quarter-turn count in `{-2, -1, 1, 2}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Rotation axis.
    pub axis: Axis,
    /// Coordinate value selecting the participating layer.
    pub layer: Sign,
    /// Signed number of 90-degree steps about the positive axis (right-hand
    /// rule).
    pub quarter_turns: i8,
}
impl FromStr for Twist {
    type Err = ParseTwistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTwistError::InvalidToken(s.to_string());
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_char).ok_or_else(err)?;
        let quarter_turns = match chars.next() {
            None => face.base_direction(),
            Some('\'') => -face.base_direction(),
            Some('2') => 2 * face.base_direction(),
            Some(_) => return Err(err()),
        };
        if chars.next().is_some() {
            return Err(err());
        }
        Ok(Self {
            axis: face.axis(),
            layer: face.layer(),
            quarter_turns,
        })
    }
}
impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Face::from_axis_layer(self.axis, self.layer) {
            Some(face) => {
                write!(f, "{face}")?;
                // -1 and 2 never combine in tokens, so "2" covers both
                // double-turn directions.
                match self.quarter_turns * face.base_direction().signum() {
                    1 => Ok(()),
                    -1 => write!(f, "'"),
                    _ => write!(f, "2"),
                }
            }
            // Middle layers have no token; fall back to a debug form.
            None => write!(f, "{:?}{:+}", self.axis, self.quarter_turns),
        }
    }
}
impl Twist {
    /// Returns the inverse twist.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            quarter_turns: -self.quarter_turns,
            ..self
        }
    }

    /// Returns the total signed rotation angle, in radians.
    pub fn total_angle(self) -> f32 {
        self.quarter_turns as f32 * FRAC_PI_2
    }

    /// Returns a uniformly random twist from the 18-token move alphabet
    /// (6 faces x {plain, inverse, double}).
    pub fn from_rng(rng: &mut impl Rng) -> Self {
        let face = Face::ALL[rng.gen_range(0..Face::ALL.len())];
        let quarter_turns = match rng.gen_range(0..3) {
            0 => face.base_direction(),
            1 => -face.base_direction(),
            _ => 2 * face.base_direction(),
        };
        Self {
            axis: face.axis(),
            layer: face.layer(),
            quarter_turns,
        }
    }
}

/// Parses a whitespace-separated sequence of move tokens, e.g. `"R U R' U2"`.
pub fn parse_algorithm(s: &str) -> Result<Vec<Twist>, ParseTwistError> {
    s.split_whitespace().map(str::parse).collect()
}
