use glam::Vec4;
use uuid::Uuid;

/// A named surface description bindable to a placed object.
///
/// Shading itself is the renderer's concern; the scene graph only carries
/// the binding and the base color (used by the debug wireframe material).
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,
    pub color: Vec4,
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Vec4) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            color,
        }
    }
}
