use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::errors::{Result, UmbraError};
use crate::resources::{Animation, Material, Mesh};

// Strongly-typed handles
new_key_type! {
    pub struct MeshHandle;
    pub struct MaterialHandle;
    pub struct AnimationHandle;
}

/// Name-keyed registry for meshes, materials, and animation clips.
///
/// Handles are generational: a handle to a replaced or removed asset simply
/// stops resolving instead of aliasing new data. Resolution by name is the
/// failable path: feature-node creation requires its named assets to be
/// registered up front, and a miss is reported as [`UmbraError::AssetNotFound`].
#[derive(Default)]
pub struct AssetRegistry {
    meshes: SlotMap<MeshHandle, Mesh>,
    mesh_names: FxHashMap<String, MeshHandle>,

    materials: SlotMap<MaterialHandle, Material>,
    material_names: FxHashMap<String, MaterialHandle>,

    animations: SlotMap<AnimationHandle, Animation>,
    animation_names: FxHashMap<String, AnimationHandle>,
}

impl AssetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    /// Registers a mesh under its name. Re-registering a name replaces the
    /// previous entry; outstanding handles to the old mesh stop resolving.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        let name = mesh.name.clone();
        let handle = self.meshes.insert(mesh);
        if let Some(old) = self.mesh_names.insert(name.clone(), handle) {
            log::warn!("Mesh '{name}' re-registered, replacing previous entry");
            self.meshes.remove(old);
        }
        handle
    }

    pub fn resolve_mesh(&self, name: &str) -> Result<MeshHandle> {
        self.mesh_names
            .get(name)
            .copied()
            .ok_or_else(|| UmbraError::AssetNotFound(name.to_string()))
    }

    #[must_use]
    pub fn get_mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle)
    }

    // ========================================================================
    // Materials
    // ========================================================================

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let name = material.name.clone();
        let handle = self.materials.insert(material);
        if let Some(old) = self.material_names.insert(name.clone(), handle) {
            log::warn!("Material '{name}' re-registered, replacing previous entry");
            self.materials.remove(old);
        }
        handle
    }

    pub fn resolve_material(&self, name: &str) -> Result<MaterialHandle> {
        self.material_names
            .get(name)
            .copied()
            .ok_or_else(|| UmbraError::AssetNotFound(name.to_string()))
    }

    #[must_use]
    pub fn get_material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    // ========================================================================
    // Animations
    // ========================================================================

    pub fn add_animation(&mut self, animation: Animation) -> AnimationHandle {
        let name = animation.name.clone();
        let handle = self.animations.insert(animation);
        if let Some(old) = self.animation_names.insert(name.clone(), handle) {
            log::warn!("Animation '{name}' re-registered, replacing previous entry");
            self.animations.remove(old);
        }
        handle
    }

    pub fn resolve_animation(&self, name: &str) -> Result<AnimationHandle> {
        self.animation_names
            .get(name)
            .copied()
            .ok_or_else(|| UmbraError::AssetNotFound(name.to_string()))
    }

    #[must_use]
    pub fn get_animation(&self, handle: AnimationHandle) -> Option<&Animation> {
        self.animations.get(handle)
    }
}
