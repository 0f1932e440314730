//! CPU-side resource definitions.
//!
//! The data structures renderable content is built from, with no GPU
//! coupling:
//! - Mesh: named geometry record with a local-space bounding box
//! - Material: named surface description
//! - Animation: named clip metadata
//! - BoundingBox / BoundingSphere: spatial extents

pub mod animation;
pub mod bounding;
pub mod material;
pub mod mesh;

pub use animation::Animation;
pub use bounding::{BoundingBox, BoundingSphere};
pub use material::Material;
pub use mesh::Mesh;
