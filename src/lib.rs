pub mod assets;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod shadow;

pub use assets::{AnimationHandle, AssetRegistry, MaterialHandle, MeshHandle};
pub use errors::UmbraError;
pub use resources::{Animation, BoundingBox, BoundingSphere, Material, Mesh};
pub use scene::{Camera, Node, NodeFlags, Object, ObjectSource, Scene, SceneManager};
pub use scene::queues::{FrameSync, SceneQueues};
pub use shadow::{Shadow, ShadowConfig, CASCADE_COUNT};
