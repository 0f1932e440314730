//! Cascaded shadow mapping.
//!
//! Maintains three light-space orthographic projections that tightly bound
//! successive depth ranges of the viewer's frustum (near, mid, far) and
//! recomputes them cheaply per frame without re-deriving geometry.

pub mod cascade;

pub use cascade::{CASCADE_COUNT, Shadow, ShadowConfig};
