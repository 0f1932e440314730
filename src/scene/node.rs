use bitflags::bitflags;
use glam::{Affine3A, Vec3};

use crate::resources::BoundingBox;
use crate::scene::NodeHandle;
use crate::scene::object::Object;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Transform is immutable after creation; the node is exempt from
        /// per-frame update queueing.
        const FULL_STATIC   = 1 << 0;
        /// Render data may be merged with siblings into one batched draw.
        const DYNAMIC_BATCH = 1 << 1;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::DYNAMIC_BATCH
    }
}

/// A scene-graph node.
///
/// Nodes form a tree through handles: `parent` points up, `children` holds
/// the exclusively-owned subtree (removing a node removes its descendants).
/// Attached [`Object`]s are owned by exactly one node.
///
/// The world transform and bounding box are derived state, recomputed by
/// [`Scene::refresh_node`](crate::scene::Scene::refresh_node), either
/// synchronously (feature nodes) or through the deferred update queue.
#[derive(Debug, Clone, Default)]
pub struct Node {
    // === Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Spatial data ===
    /// Local position, relative to the parent.
    pub position: Vec3,
    /// Derived local-to-world transform.
    pub(crate) world_matrix: Affine3A,
    /// Derived world-space extents of this node's objects and subtree.
    pub bounding: Option<BoundingBox>,

    // === Content ===
    pub objects: Vec<Object>,

    // === State ===
    pub flags: NodeFlags,
}

impl Node {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            position,
            world_matrix: Affine3A::from_translation(position),
            bounding: None,
            objects: Vec::new(),
            flags: NodeFlags::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// The derived local-to-world transform.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    #[inline]
    #[must_use]
    pub fn is_full_static(&self) -> bool {
        self.flags.contains(NodeFlags::FULL_STATIC)
    }

    pub fn set_full_static(&mut self, full_static: bool) {
        self.flags.set(NodeFlags::FULL_STATIC, full_static);
    }

    #[inline]
    #[must_use]
    pub fn is_dynamic_batch(&self) -> bool {
        self.flags.contains(NodeFlags::DYNAMIC_BATCH)
    }

    pub fn set_dynamic_batch(&mut self, dynamic_batch: bool) {
        self.flags.set(NodeFlags::DYNAMIC_BATCH, dynamic_batch);
    }
}
