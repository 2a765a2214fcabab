//! Cube state: owns the cubies and answers layer-membership queries.

use smallvec::SmallVec;

use crate::prefs::Preferences;
use crate::scene::{NodeId, Scene, Transform};

use super::cubie::{sticker_colors, Cubie};
use super::orientation::{Coord, Orientation};
use super::sign::{Axis, Sign};

/// Index of a cubie within the cube state.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubieId(pub u16);

/// The set of cubies in a layer; at most 9 on a 3x3x3.
pub type LayerCubies = SmallVec<[CubieId; 9]>;

/// The full state of the 3x3x3 cube.
///
/// The multiset of lattice coordinates across all cubies always equals the
/// full lattice minus the core: turns permute coordinates among cubies but
/// never create, destroy, or duplicate them. The only mutations are
/// [`CubeState::commit_turn`] and a full rebuild.
#[derive(Debug, Clone)]
pub struct CubeState {
    cubies: Vec<Cubie>,
    root: NodeId,
}
impl CubeState {
    /// Builds a solved cube, creating one renderable box per cubie under a
    /// fresh root group node.
    pub fn new(scene: &mut impl Scene, prefs: &Preferences) -> Self {
        let root = scene.create_node(scene.root(), Transform::identity());
        let offset = prefs.position_offset();
        let cubies = Coord::iter()
            .map(|coord| {
                let transform = Transform {
                    position: coord.to_position(offset),
                    rotation: Orientation::IDENTITY.to_quaternion(),
                };
                let node = scene.create_box(root, transform, sticker_colors(coord));
                Cubie {
                    coord,
                    orientation: Orientation::IDENTITY,
                    node,
                }
            })
            .collect();
        log::debug!("built cube under root node {root:?}");
        Self { cubies, root }
    }

    /// Returns the scene node grouping all cubies.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the cubie with the given id.
    pub fn cubie(&self, id: CubieId) -> &Cubie {
        &self.cubies[id.0 as usize]
    }
    /// Returns all cubies.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }
    /// Returns an iterator over all cubie ids.
    pub fn ids(&self) -> impl Iterator<Item = CubieId> {
        (0..self.cubies.len() as u16).map(CubieId)
    }

    /// Returns the cubies whose lattice coordinate along `axis` equals
    /// `layer`: 9 for an outer layer, 8 for the middle layer (the core slot is
    /// empty).
    ///
    /// Membership is decided purely from the integer model; live render
    /// transforms are never consulted.
    pub fn cubies_in_layer(&self, axis: Axis, layer: Sign) -> LayerCubies {
        self.ids()
            .filter(|&id| self.cubie(id).coord[axis] == layer)
            .collect()
    }

    /// Permutes the given cubies by `quarter_turns` 90-degree steps about
    /// `axis` and composes their orientations with the same rotation.
    ///
    /// Pure integer group arithmetic; this is what keeps the lattice invariant
    /// exact over arbitrarily many moves.
    pub fn commit_turn(&mut self, ids: &[CubieId], axis: Axis, quarter_turns: i8) {
        let rot = Orientation::from_axis_turns(axis, quarter_turns);
        for &id in ids {
            let cubie = &mut self.cubies[id.0 as usize];
            cubie.coord = rot * cubie.coord;
            cubie.orientation = rot * cubie.orientation;
        }
    }
}
