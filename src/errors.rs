//! Error Types
//!
//! The failure surface of this crate is narrow: the only operations that can
//! fail at runtime are name-keyed asset lookups. Graph invariants
//! (use-after-removal, duplicate queue entries) are prevented structurally by
//! generational handles and liveness checks, so they never surface as errors.

use thiserror::Error;

/// The error type for scene and shadow operations.
#[derive(Error, Debug)]
pub enum UmbraError {
    /// A named mesh, material, or animation is missing from the registry.
    ///
    /// Feature-node creation (`create_sky`, `create_water`, `create_terrain`,
    /// `create_node_aabb`) requires its assets to be registered beforehand;
    /// a miss is a fatal precondition violation on the caller's side.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

/// Alias for `Result<T, UmbraError>`.
pub type Result<T> = std::result::Result<T, UmbraError>;
