use slotmap::{SlotMap, new_key_type};

use crate::assets::AssetRegistry;
use crate::scene::Scene;

new_key_type! {
    pub struct SceneHandle;
}

/// Owns scene lifecycles and tracks which scene is active.
///
/// Scenes are fully independent (each carries its own queues and instance
/// tables), so several can coexist (loading screen behind a live level,
/// editor preview scenes) without contending on shared state.
#[derive(Default)]
pub struct SceneManager {
    scenes: SlotMap<SceneHandle, Scene>,
    active_scene: Option<SceneHandle>,
}

impl SceneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new scene around the given registry, returning its handle.
    pub fn create_scene(&mut self, assets: AssetRegistry) -> SceneHandle {
        self.scenes.insert(Scene::new(assets))
    }

    pub fn remove_scene(&mut self, handle: SceneHandle) {
        if self.active_scene == Some(handle) {
            self.active_scene = None;
            log::warn!("Active scene was removed");
        }
        self.scenes.remove(handle);
    }

    pub fn set_active(&mut self, handle: SceneHandle) {
        if self.scenes.contains_key(handle) {
            self.active_scene = Some(handle);
        } else {
            log::error!("Attempted to set invalid SceneHandle as active");
        }
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<SceneHandle> {
        self.active_scene
    }

    #[must_use]
    pub fn get_scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle)
    }

    pub fn get_scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle)
    }

    #[must_use]
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active_scene.and_then(|h| self.scenes.get(h))
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.active_scene.and_then(|h| self.scenes.get_mut(h))
    }
}
