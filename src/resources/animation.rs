use uuid::Uuid;

use crate::resources::bounding::BoundingBox;

/// Named animation clip metadata.
///
/// Keyframe data and skinning live outside this crate; the scene graph needs
/// the clip's duration for play-list bookkeeping and its rest-pose extents
/// to bound placed animation instances.
#[derive(Debug, Clone)]
pub struct Animation {
    pub uuid: Uuid,
    pub name: String,
    /// Clip length in seconds.
    pub duration: f32,
    /// Rest-pose extents, before instance scaling.
    pub bounding: BoundingBox,
}

impl Animation {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32, bounding: BoundingBox) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            duration,
            bounding,
        }
    }
}
