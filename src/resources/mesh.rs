use uuid::Uuid;

use crate::resources::bounding::BoundingBox;

/// A named geometry record.
///
/// The scene graph never touches vertex data; it only needs the mesh's
/// local-space extents to derive placed-object bounds. Vertex and index
/// buffers live with the renderer, outside this crate.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub uuid: Uuid,
    pub name: String,
    /// Local-space extents of the geometry, before instance scaling.
    pub bounding: BoundingBox,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, bounding: BoundingBox) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            bounding,
        }
    }

    /// A mesh whose extents are the unit cube, the common case for
    /// primitives placed purely through object position and size.
    #[must_use]
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, BoundingBox::unit())
    }
}
