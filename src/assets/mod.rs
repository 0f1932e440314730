//! Asset registry.
//!
//! Name-keyed storage for the resources scene content references. Loading
//! and decoding are external concerns; this crate consumes the registry as a
//! lookup service.

pub mod registry;

pub use registry::{AnimationHandle, AssetRegistry, MaterialHandle, MeshHandle};
