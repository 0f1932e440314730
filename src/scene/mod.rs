//! Scene graph system.
//!
//! Hierarchical spatial organization of renderable content:
//! - Node: tree element with attached objects and a bounding volume
//! - Object: placed instance of a mesh (with LOD slots) or an animation
//! - Camera: view/projection state with frustum extraction
//! - Scene: the node arena, feature singletons, and deferred queues
//! - SceneQueues / FrameSync: producer/consumer synchronization

pub mod camera;
pub mod instances;
pub mod manager;
pub mod node;
pub mod object;
pub mod queues;
pub mod scene;

pub use camera::{Camera, Frustum, ProjectionType};
pub use instances::{InstanceSource, InstanceTables};
pub use manager::{SceneHandle, SceneManager};
pub use node::{Node, NodeFlags};
pub use object::{Object, ObjectSource};
pub use scene::{Scene, TerrainWindow};

use slotmap::new_key_type;

new_key_type! {
    /// Generational handle to a node in a scene's arena.
    ///
    /// Handles outlive their nodes safely: once a node is removed, every
    /// outstanding handle to it stops resolving, which is what lets the
    /// deferred queues tolerate stale entries.
    pub struct NodeHandle;
}
