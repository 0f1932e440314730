//! Mesh and animation instance accounting.
//!
//! Answers "how many placed objects use resource R" without rescanning the
//! tree, and keeps an ordered list of resources in first-seen order for
//! downstream batching and LOD decisions.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::assets::{AnimationHandle, MeshHandle};
use crate::scene::object::{Object, ObjectSource};

/// First-registration record of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSource {
    /// A mesh, together with the object that introduced it.
    Mesh { mesh: MeshHandle, object: Uuid },
    Animation(AnimationHandle),
}

/// Usage counts per resource, plus the ordered discovery list.
///
/// Counts are registration counts: every [`register`](Self::register) of an
/// object increments each of its distinct resource slots, and nothing
/// decrements. A resource enters the discovery list exactly once, on its
/// first registration. A zero entry created by a count query does not
/// suppress the later append.
#[derive(Default)]
pub struct InstanceTables {
    mesh_counts: FxHashMap<MeshHandle, u32>,
    animation_counts: FxHashMap<AnimationHandle, u32>,
    discovered: Vec<InstanceSource>,
}

impl InstanceTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one placed object's resource usage.
    ///
    /// Mesh objects count once per distinct LOD slot: an object whose mid
    /// or low slot repeats a better slot's mesh does not double-count it.
    /// Animation objects count in the animation table.
    pub fn register(&mut self, object: &Object) {
        match object.source {
            ObjectSource::Mesh { high, mid, low } => {
                self.count_mesh(high, object.uuid);
                if let Some(mid) = mid
                    && mid != high
                {
                    self.count_mesh(mid, object.uuid);
                }
                if let Some(low) = low
                    && Some(low) != mid
                    && low != high
                {
                    self.count_mesh(low, object.uuid);
                }
            }
            ObjectSource::Animation(animation) => {
                let count = self.animation_counts.entry(animation).or_insert(0);
                if *count == 0 {
                    self.discovered.push(InstanceSource::Animation(animation));
                }
                *count += 1;
            }
        }
    }

    fn count_mesh(&mut self, mesh: MeshHandle, object: Uuid) {
        let count = self.mesh_counts.entry(mesh).or_insert(0);
        if *count == 0 {
            self.discovered.push(InstanceSource::Mesh { mesh, object });
        }
        *count += 1;
    }

    /// Current usage count for a mesh. A never-seen mesh reads as zero and
    /// gets its table entry initialized. A total lookup, not a failable one.
    pub fn query_mesh_count(&mut self, mesh: MeshHandle) -> u32 {
        *self.mesh_counts.entry(mesh).or_insert(0)
    }

    /// Current usage count for an animation clip, zero-initializing on miss.
    pub fn query_animation_count(&mut self, animation: AnimationHandle) -> u32 {
        *self.animation_counts.entry(animation).or_insert(0)
    }

    /// Resources in first-seen order.
    #[must_use]
    pub fn discovered(&self) -> &[InstanceSource] {
        &self.discovered
    }
}
