//! The rendering boundary.
//!
//! The move engine never talks to a renderer directly; it drives an abstract
//! [`Scene`] that knows how to group objects, reparent them without moving
//! them in world space, and rotate a pivot about a world axis. A real renderer
//! binding implements [`Scene`] on top of its scene graph and calls
//! [`crate::CubeController::frame`] from its frame callback; [`SceneGraph`] is
//! the bundled reference implementation, which is also what the tests run
//! against.

use cgmath::{InnerSpace, Quaternion, Rad, Rotation, Rotation3, Vector3};

/// RGB sticker color.
pub type Color = [u8; 3];

/// Opaque handle to a scene node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A rigid transform: position plus rotation, unit scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vector3<f32>,
    /// Rotation.
    pub rotation: Quaternion<f32>,
}
impl Transform {
    /// Returns the identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
    /// Composes two transforms; `self` is the outer (parent) frame.
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * child.position,
            rotation: self.rotation * child.rotation,
        }
    }
    /// Returns the inverse transform.
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.invert();
        Transform {
            position: -(rotation * self.position),
            rotation,
        }
    }
}

/// Scene-graph services the move engine consumes.
///
/// Node ids handed out by a scene stay valid until [`Scene::remove`] destroys
/// the node; passing a destroyed id afterwards is a caller bug and may panic.
pub trait Scene {
    /// Returns the root node of the scene.
    fn root(&self) -> NodeId;

    /// Creates an empty group node (used as a rotation pivot).
    fn create_node(&mut self, parent: NodeId, transform: Transform) -> NodeId;

    /// Creates a renderable box with up to six sticker colors, in
    /// `+X, -X, +Y, -Y, +Z, -Z` face order.
    fn create_box(
        &mut self,
        parent: NodeId,
        transform: Transform,
        stickers: [Option<Color>; 6],
    ) -> NodeId;

    /// Moves `node` under `new_parent`, preserving its world transform.
    fn attach(&mut self, node: NodeId, new_parent: NodeId);

    /// Rotates `node` by `angle` about the given world-space axis, composing
    /// with its current rotation. The node's position is unchanged.
    fn rotate_about_world_axis(&mut self, node: NodeId, axis: Vector3<f32>, angle: Rad<f32>);

    /// Replaces the node's transform relative to its parent.
    fn set_transform(&mut self, node: NodeId, transform: Transform);

    /// Returns the node's world transform.
    fn world_transform(&self, node: NodeId) -> Transform;

    /// Destroys the node and all of its descendants.
    fn remove(&mut self, node: NodeId);
}

#[derive(Debug, Clone)]
enum NodeKind {
    Group,
    Box { stickers: [Option<Color>; 6] },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    local: Transform,
    kind: NodeKind,
}

/// Reference [`Scene`] implementation: a parent-indexed node arena.
///
/// Holds everything a renderer binding needs (hierarchy, transforms, sticker
/// colors) without rendering anything itself.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    free: Vec<u32>,
}
impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
impl SceneGraph {
    /// Creates a scene containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node {
                parent: None,
                local: Transform::identity(),
                kind: NodeKind::Group,
            })],
            free: vec![],
        }
    }

    /// Returns the number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Returns the sticker colors of a box node, or `None` for group nodes.
    pub fn stickers(&self, node: NodeId) -> Option<[Option<Color>; 6]> {
        match self.node(node).kind {
            NodeKind::Group => None,
            NodeKind::Box { stickers } => Some(stickers),
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0 as usize) {
            Some(Some(node)) => node,
            _ => panic!("stale scene node id {id:?}"),
        }
    }
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0 as usize) {
            Some(Some(node)) => node,
            _ => panic!("stale scene node id {id:?}"),
        }
    }
    fn insert(&mut self, node: Node) -> NodeId {
        // Reuse freed slots so transient pivots don't grow the arena.
        match self.free.pop() {
            Some(i) => {
                self.nodes[i as usize] = Some(node);
                NodeId(i)
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Some(node));
                id
            }
        }
    }
    fn is_in_subtree(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }
}
impl Scene for SceneGraph {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn create_node(&mut self, parent: NodeId, transform: Transform) -> NodeId {
        self.node(parent); // validate
        self.insert(Node {
            parent: Some(parent),
            local: transform,
            kind: NodeKind::Group,
        })
    }

    fn create_box(
        &mut self,
        parent: NodeId,
        transform: Transform,
        stickers: [Option<Color>; 6],
    ) -> NodeId {
        self.node(parent); // validate
        self.insert(Node {
            parent: Some(parent),
            local: transform,
            kind: NodeKind::Box { stickers },
        })
    }

    fn attach(&mut self, node: NodeId, new_parent: NodeId) {
        let world = self.world_transform(node);
        let parent_world = self.world_transform(new_parent);
        let n = self.node_mut(node);
        n.local = parent_world.inverse().compose(&world);
        n.parent = Some(new_parent);
    }

    fn rotate_about_world_axis(&mut self, node: NodeId, axis: Vector3<f32>, angle: Rad<f32>) {
        let world_delta = Quaternion::from_axis_angle(axis.normalize(), angle);
        let parent_rotation = match self.node(node).parent {
            Some(parent) => self.world_transform(parent).rotation,
            None => Quaternion::new(1.0, 0.0, 0.0, 0.0),
        };
        // Express the world-space delta in the parent's frame, then compose.
        let local_delta = parent_rotation.invert() * world_delta * parent_rotation;
        let n = self.node_mut(node);
        n.local.rotation = local_delta * n.local.rotation;
    }

    fn set_transform(&mut self, node: NodeId, transform: Transform) {
        self.node_mut(node).local = transform;
    }

    fn world_transform(&self, node: NodeId) -> Transform {
        let n = self.node(node);
        match n.parent {
            Some(parent) => self.world_transform(parent).compose(&n.local),
            None => n.local,
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.node(node); // validate
        let doomed: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| {
                self.nodes[i].is_some() && self.is_in_subtree(NodeId(i as u32), node)
            })
            .collect();
        for i in doomed {
            self.nodes[i] = None;
            self.free.push(i as u32);
        }
    }
}
