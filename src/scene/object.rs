use glam::{Affine3A, Vec3};
use uuid::Uuid;

use crate::assets::{AnimationHandle, AssetRegistry, MaterialHandle, MeshHandle};
use crate::resources::BoundingBox;

/// What a placed object instantiates.
///
/// Explicit variant tag instead of a downcast: instance accounting and the
/// debug-AABB builder branch on this safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSource {
    /// A mesh with up to three LOD variants. `high` always resolves; `mid`
    /// and `low` fall back to the next-better slot when absent.
    Mesh {
        high: MeshHandle,
        mid: Option<MeshHandle>,
        low: Option<MeshHandle>,
    },
    /// An animation instance.
    Animation(AnimationHandle),
}

/// A placed instance of a mesh or an animation, owned by exactly one node.
#[derive(Debug, Clone)]
pub struct Object {
    pub uuid: Uuid,
    /// Position relative to the owning node.
    pub position: Vec3,
    /// Per-axis scale applied to the source extents.
    pub size: Vec3,
    pub material: Option<MaterialHandle>,
    pub source: ObjectSource,

    /// Source extents captured at construction, before instance scaling.
    pub(crate) local_bounds: Option<BoundingBox>,
    /// Derived world-space extents, refreshed with the owning node.
    pub bounding: Option<BoundingBox>,
}

impl Object {
    /// Creates a mesh-backed object. The local bounds are captured from the
    /// high-LOD mesh; LOD variants are assumed to share extents.
    #[must_use]
    pub fn with_mesh(
        assets: &AssetRegistry,
        high: MeshHandle,
        mid: Option<MeshHandle>,
        low: Option<MeshHandle>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position: Vec3::ZERO,
            size: Vec3::ONE,
            material: None,
            source: ObjectSource::Mesh { high, mid, low },
            local_bounds: assets.get_mesh(high).map(|m| m.bounding),
            bounding: None,
        }
    }

    /// Creates an animation-backed object bounded by the clip's rest pose.
    #[must_use]
    pub fn with_animation(assets: &AssetRegistry, animation: AnimationHandle) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position: Vec3::ZERO,
            size: Vec3::ONE,
            material: None,
            source: ObjectSource::Animation(animation),
            local_bounds: assets.get_animation(animation).map(|a| a.bounding),
            bounding: None,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Vec3) {
        self.size = size;
    }

    pub fn bind_material(&mut self, material: MaterialHandle) {
        self.material = Some(material);
    }

    /// True for animation instances, which count in the animation table
    /// rather than the mesh table.
    #[inline]
    #[must_use]
    pub fn is_animation(&self) -> bool {
        matches!(self.source, ObjectSource::Animation(_))
    }

    /// Recomputes the world-space bounding box from the owning node's
    /// world transform. Objects without captured source extents stay
    /// unbounded.
    pub(crate) fn update_bounding(&mut self, node_world: &Affine3A) {
        self.bounding = self.local_bounds.map(|local| {
            local
                .scaled_translated(self.size, self.position)
                .transform(node_world)
        });
    }
}
