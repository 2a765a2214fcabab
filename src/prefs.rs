//! User-tunable preferences.

use serde::{Deserialize, Serialize};

/// Animation and geometry preferences.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Duration of one twist animation, in seconds.
    pub twist_duration: f32,
    /// Number of random moves issued by a shuffle.
    pub shuffle_length: usize,
    /// Edge length of one cubie, in scene units.
    pub cubie_size: f32,
    /// Gap between adjacent cubies, in scene units.
    pub cubie_gap: f32,
}
impl Default for Preferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.25,
            shuffle_length: 20,
            cubie_size: 1.0,
            cubie_gap: 0.05,
        }
    }
}
impl Preferences {
    /// Distance between the centers of adjacent lattice slots.
    pub fn position_offset(&self) -> f32 {
        self.cubie_size + self.cubie_gap
    }
}
