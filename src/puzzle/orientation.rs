//! Integer lattice coordinates and the cube's discrete rotation group.
//!
//! Everything in this module is exact integer arithmetic. Turns permute
//! lattice coordinates and compose orientations without ever touching floating
//! point, so no error can accumulate no matter how many moves are applied.

use std::ops::{Index, IndexMut, Mul};

use cgmath::{Matrix3, Quaternion, Vector3, Zero};
use strum::IntoEnumIterator;

use super::sign::{Axis, Sign};

/// A lattice coordinate in `[-1, 0, 1]^3`.
///
/// This is a cubie's logical position, independent of any render transform.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(pub [Sign; 3]);
impl Index<Axis> for Coord {
    type Output = Sign;
    fn index(&self, axis: Axis) -> &Sign {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for Coord {
    fn index_mut(&mut self, axis: Axis) -> &mut Sign {
        &mut self.0[axis.int()]
    }
}
impl Coord {
    /// The coordinate at the center of the cube, which holds no cubie.
    pub const CORE: Coord = Coord([Sign::Zero; 3]);

    /// Returns an iterator over all 26 cubie coordinates (the full lattice
    /// minus the core).
    pub fn iter() -> impl Iterator<Item = Coord> {
        itertools::iproduct!(Sign::iter(), Sign::iter(), Sign::iter())
            .map(|(z, y, x)| Coord([x, y, z]))
            .filter(|&coord| coord != Coord::CORE)
    }

    /// Returns the render-space position of this coordinate, given the
    /// distance between adjacent lattice slots.
    pub fn to_position(self, offset: f32) -> Vector3<f32> {
        Vector3::new(
            self.0[0].float() * offset,
            self.0[1].float() * offset,
            self.0[2].float() * offset,
        )
    }
}

/// An axis together with a sign, e.g. `+X` or `-Z`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedAxis {
    /// The axis.
    pub axis: Axis,
    /// The direction along the axis.
    pub sign: Sign,
}
impl SignedAxis {
    /// Returns the signed axis with the given axis and sign.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }
}

/// One of the 24 proper rotations of the cube, stored as a signed axis
/// permutation.
///
/// `orientation[axis]` gives the signed axis whose input component ends up
/// along `+axis` after applying the rotation; i.e. for a coordinate `c`,
/// `(orientation * c)[axis] == c[orientation[axis].axis] * orientation[axis].sign`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation([SignedAxis; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Index<Axis> for Orientation {
    type Output = SignedAxis;
    fn index(&self, axis: Axis) -> &SignedAxis {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for Orientation {
    fn index_mut(&mut self, axis: Axis) -> &mut SignedAxis {
        &mut self.0[axis.int()]
    }
}
impl Mul<Orientation> for Orientation {
    type Output = Self;

    /// Composes two rotations; `rhs` is applied first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        let mut ret = Self::IDENTITY;
        for axis in Axis::iter() {
            let inner = rhs[self[axis].axis];
            ret[axis] = SignedAxis::new(inner.axis, inner.sign * self[axis].sign);
        }
        ret
    }
}
impl Mul<Coord> for Orientation {
    type Output = Coord;

    /// Applies the rotation to a lattice coordinate.
    fn mul(self, rhs: Coord) -> Coord {
        let mut ret = Coord::CORE;
        for axis in Axis::iter() {
            ret[axis] = rhs[self[axis].axis] * self[axis].sign;
        }
        ret
    }
}
impl Orientation {
    /// The identity rotation.
    pub const IDENTITY: Self = Self([
        SignedAxis::new(Axis::X, Sign::Pos),
        SignedAxis::new(Axis::Y, Sign::Pos),
        SignedAxis::new(Axis::Z, Sign::Pos),
    ]);

    /// Returns the rotation taking `+from` to `+to` by a single 90-degree
    /// turn. The two axes must be distinct.
    #[must_use]
    pub fn rot90(from: Axis, to: Axis) -> Self {
        let mut ret = Self::IDENTITY;
        ret[to] = SignedAxis::new(from, Sign::Pos);
        ret[from] = SignedAxis::new(to, Sign::Neg);
        ret
    }

    /// Returns the rotation of `quarter_turns` 90-degree steps about `axis`,
    /// following the right-hand rule (positive turns are counterclockwise
    /// sighted from the positive end of the axis).
    #[must_use]
    pub fn from_axis_turns(axis: Axis, quarter_turns: i8) -> Self {
        let (u, v) = axis.perpendiculars();
        let step = match quarter_turns >= 0 {
            true => Self::rot90(u, v),
            false => Self::rot90(u, v).rev(),
        };
        let mut ret = Self::IDENTITY;
        for _ in 0..(quarter_turns.unsigned_abs() % 4) {
            ret = step * ret;
        }
        ret
    }

    /// Returns the inverse rotation.
    #[must_use]
    pub fn rev(self) -> Self {
        let mut ret = Self::IDENTITY;
        for axis in Axis::iter() {
            ret[self[axis].axis] = SignedAxis::new(axis, self[axis].sign);
        }
        ret
    }

    /// Returns the rotation as a floating-point matrix, for handing to the
    /// scene.
    pub fn to_matrix(self) -> Matrix3<f32> {
        let mut ret = Matrix3::zero();
        for axis in Axis::iter() {
            // cgmath matrices are indexed column-first.
            ret[self[axis].axis.int()][axis.int()] = self[axis].sign.float();
        }
        ret
    }

    /// Returns the rotation as a unit quaternion.
    pub fn to_quaternion(self) -> Quaternion<f32> {
        Quaternion::from(self.to_matrix())
    }

    /// Quantizes a floating-point rotation matrix to the nearest element of
    /// the rotation group, or `None` if the matrix is not within rounding
    /// distance of a signed axis permutation.
    pub fn from_matrix(m: Matrix3<f32>) -> Option<Self> {
        let mut ret = Self::IDENTITY;
        let mut columns_seen = [false; 3];
        for axis in Axis::iter() {
            let mut entry = None;
            for col in Axis::iter() {
                match m[col.int()][axis.int()].round() as i8 {
                    0 => (),
                    1 => entry = entry.xor(Some(SignedAxis::new(col, Sign::Pos))),
                    -1 => entry = entry.xor(Some(SignedAxis::new(col, Sign::Neg))),
                    _ => return None,
                }
            }
            let entry = entry?;
            if std::mem::replace(&mut columns_seen[entry.axis.int()], true) {
                return None; // column used twice; not a permutation
            }
            ret[axis] = entry;
        }
        Some(ret)
    }
}
