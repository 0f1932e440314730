use std::sync::Arc;

use glam::{Affine3A, Mat4, Vec3};
use slotmap::SlotMap;

use crate::assets::{AnimationHandle, AssetRegistry, MaterialHandle, MeshHandle};
use crate::errors::Result;
use crate::resources::BoundingBox;
use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::instances::InstanceTables;
use crate::scene::node::Node;
use crate::scene::object::Object;
use crate::scene::queues::SceneQueues;

/// Visible terrain block window, in block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainWindow {
    pub block_x: i32,
    pub block_z: i32,
    pub size_x: i32,
    pub size_z: i32,
}

/// The scene: node arena, feature singletons, instance accounting, and the
/// deferred update/removal queues.
///
/// Per frame, the simulation context queues dirty and doomed nodes through
/// [`SceneQueues`]; the frame-preparation pass drains them with
/// [`update_nodes`](Self::update_nodes) and [`flush_nodes`](Self::flush_nodes).
/// Feature nodes (sky, water, terrain) bypass the queues: creation refreshes
/// them synchronously so they are render-ready before the next drain.
pub struct Scene {
    pub assets: AssetRegistry,

    pub(crate) nodes: SlotMap<NodeHandle, Node>,

    // === Fixed roots ===
    pub static_root: NodeHandle,
    pub billboard_root: NodeHandle,
    pub animation_root: NodeHandle,

    // === Cameras ===
    pub main_camera: Camera,
    pub reflect_camera: Option<Camera>,

    // === Feature singletons ===
    sky: Option<NodeHandle>,
    sky_dynamic: bool,
    water: Option<NodeHandle>,
    water_level: f32,
    terrain: Option<NodeHandle>,
    terrain_window: Option<TerrainWindow>,

    // === Bookkeeping ===
    bounding_nodes: Vec<NodeHandle>,
    instances: InstanceTables,
    play_list: Vec<NodeHandle>,
    queues: Arc<SceneQueues>,

    /// Set externally once first-frame setup completes.
    pub inited: bool,
}

impl Scene {
    #[must_use]
    pub fn new(assets: AssetRegistry) -> Self {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let static_root = nodes.insert(Node::new(Vec3::ZERO));
        let billboard_root = nodes.insert(Node::new(Vec3::ZERO));
        let animation_root = nodes.insert(Node::new(Vec3::ZERO));

        Self {
            assets,
            nodes,
            static_root,
            billboard_root,
            animation_root,
            main_camera: Camera::new_perspective(60.0, 1.0, 1.0, 1000.0),
            reflect_camera: None,
            sky: None,
            sky_dynamic: false,
            water: None,
            water_level: 0.0,
            terrain: None,
            terrain_window: None,
            bounding_nodes: Vec::new(),
            instances: InstanceTables::new(),
            play_list: Vec::new(),
            queues: Arc::new(SceneQueues::new()),
            inited: false,
        }
    }

    // ========================================================================
    // Node management
    // ========================================================================

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn contains_node(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Creates a free-standing node. Attach it with [`attach`](Self::attach)
    /// or leave it as its own root (feature and debug nodes do).
    pub fn create_node(&mut self, position: Vec3) -> NodeHandle {
        self.nodes.insert(Node::new(position))
    }

    /// Creates a node already attached under `parent`.
    pub fn create_child(&mut self, parent: NodeHandle, position: Vec3) -> NodeHandle {
        let child = self.create_node(position);
        self.attach(child, parent);
        child
    }

    /// Establishes a parent-child relation, detaching the child from any
    /// previous parent first, and queues the child for a transform refresh.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent
            && let Some(n) = self.nodes.get_mut(p)
            && let Some(i) = n.children.iter().position(|&x| x == child)
        {
            n.children.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        } else {
            log::error!("Parent node not found during attach");
            return;
        }

        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }

        self.queue_node_update(child);
    }

    /// Immediately removes a node and its exclusively-owned subtree.
    /// Stale handles are ignored, which is what makes the deferred removal
    /// drain safe against duplicates.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.remove_node(child);
        }

        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(parent_handle) = parent
            && let Some(parent_node) = self.nodes.get_mut(parent_handle)
            && let Some(pos) = parent_node.children.iter().position(|&c| c == handle)
        {
            parent_node.children.remove(pos);
        }

        self.nodes.remove(handle);

        if self.sky == Some(handle) {
            self.sky = None;
        }
        if self.water == Some(handle) {
            self.water = None;
        }
        if self.terrain == Some(handle) {
            self.terrain = None;
        }
    }

    /// Attaches an object to a node: registers its resource usage, hands
    /// ownership to the node, and queues the node for a bounds refresh.
    pub fn attach_object(&mut self, handle: NodeHandle, object: Object) {
        if !self.nodes.contains_key(handle) {
            log::warn!("attach_object on a dead node; object dropped");
            return;
        }
        self.push_object(handle, object);
        self.queue_node_update(handle);
    }

    /// As [`attach_object`](Self::attach_object) but without queueing, for
    /// nodes refreshed synchronously right after.
    fn push_object(&mut self, handle: NodeHandle, object: Object) {
        self.add_object(&object);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.objects.push(object);
        }
    }

    // ========================================================================
    // Deferred queues
    // ========================================================================

    /// The queue pair shared with the simulation context. Clone the `Arc` to
    /// push updates/removals from outside the frame-preparation pass.
    #[must_use]
    pub fn queues(&self) -> &Arc<SceneQueues> {
        &self.queues
    }

    /// Marks a node dirty for the next [`update_nodes`](Self::update_nodes)
    /// drain. Full-static nodes are exempt and never enqueued.
    pub fn queue_node_update(&self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        if node.is_full_static() {
            return;
        }
        self.queues.push_update(handle);
    }

    /// Defers destruction of a node (and its subtree) to the next
    /// [`flush_nodes`](Self::flush_nodes) drain.
    pub fn queue_node_removal(&self, handle: NodeHandle) {
        self.queues.push_removal(handle);
    }

    /// Drains the pending-update queue in FIFO insertion order, refreshing
    /// each queued node once. Nodes removed since queueing are skipped via
    /// the liveness check; duplicates re-run an idempotent recompute.
    pub fn update_nodes(&mut self) {
        let pending = self.queues.take_updates();
        if pending.is_empty() {
            return;
        }
        for handle in pending {
            self.refresh_node(handle);
        }
    }

    /// Drains the pending-removal queue, releasing each listed node's
    /// subtree, then purges bookkeeping lists of dead handles so nothing
    /// reachable references a removed node.
    pub fn flush_nodes(&mut self) {
        let pending = self.queues.take_removals();
        if pending.is_empty() {
            return;
        }
        for handle in pending {
            self.remove_node(handle);
        }
        let nodes = &self.nodes;
        self.play_list.retain(|h| nodes.contains_key(*h));
        self.bounding_nodes.retain(|h| nodes.contains_key(*h));
    }

    // ========================================================================
    // Transform and bounds refresh
    // ========================================================================

    /// Synchronously recomputes a node's subtree: world transforms top-down,
    /// object bounds, subtree bounding boxes bottom-up, then re-unions the
    /// ancestors' bounds. Idempotent; a stale handle is a no-op.
    pub fn refresh_node(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        self.update_world_transforms(handle);
        self.recompute_bounds(handle);
        self.propagate_bounds_upward(handle);
    }

    /// Iterative top-down world-transform pass over a subtree, refreshing
    /// each object's world bounds along the way.
    fn update_world_transforms(&mut self, handle: NodeHandle) {
        let parent_world = self
            .nodes
            .get(handle)
            .and_then(|n| n.parent)
            .and_then(|p| self.nodes.get(p))
            .map_or(Affine3A::IDENTITY, |p| p.world_matrix);

        let mut stack: Vec<(NodeHandle, Affine3A)> = vec![(handle, parent_world)];

        while let Some((h, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(h) else {
                continue;
            };

            let world = parent_world * Affine3A::from_translation(node.position);
            node.world_matrix = world;
            for object in &mut node.objects {
                object.update_bounding(&world);
            }

            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// Post-order bounds union over a subtree: each node's box covers its
    /// objects and its children's boxes.
    fn recompute_bounds(&mut self, handle: NodeHandle) -> Option<BoundingBox> {
        let children = self.nodes.get(handle)?.children.clone();

        let mut combined: Option<BoundingBox> = None;
        for child in children {
            if let Some(child_bounds) = self.recompute_bounds(child) {
                combined = Some(match combined {
                    Some(existing) => existing.union(&child_bounds),
                    None => child_bounds,
                });
            }
        }

        let node = self.nodes.get_mut(handle)?;
        for object in &node.objects {
            if let Some(bounds) = object.bounding {
                combined = Some(match combined {
                    Some(existing) => existing.union(&bounds),
                    None => bounds,
                });
            }
        }
        node.bounding = combined;
        combined
    }

    /// Re-unions the bounding boxes of every ancestor after a subtree
    /// changed shape.
    fn propagate_bounds_upward(&mut self, handle: NodeHandle) {
        let mut current = self.nodes.get(handle).and_then(|n| n.parent);

        while let Some(h) = current {
            let Some(node) = self.nodes.get(h) else {
                break;
            };
            let children = node.children.clone();

            let mut combined: Option<BoundingBox> = None;
            for child in children {
                if let Some(bounds) = self.nodes.get(child).and_then(|c| c.bounding) {
                    combined = Some(match combined {
                        Some(existing) => existing.union(&bounds),
                        None => bounds,
                    });
                }
            }

            let Some(node) = self.nodes.get_mut(h) else {
                break;
            };
            for object in &node.objects {
                if let Some(bounds) = object.bounding {
                    combined = Some(match combined {
                        Some(existing) => existing.union(&bounds),
                        None => bounds,
                    });
                }
            }
            node.bounding = combined;
            current = node.parent;
        }
    }

    // ========================================================================
    // Feature nodes
    // ========================================================================

    /// Replaces the singleton sky node. `dynamic` selects the day-night dome
    /// that tracks the sun (updated per frame) over the fixed sky box.
    pub fn create_sky(&mut self, dynamic: bool) -> Result<NodeHandle> {
        let mesh = self.assets.resolve_mesh("sky")?;
        let material = self.assets.resolve_material("sky_mat")?;

        if let Some(old) = self.sky.take() {
            self.remove_node(old);
        }

        let handle = self.create_node(Vec3::ZERO);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_full_static(!dynamic);
        }

        let mut object = Object::with_mesh(&self.assets, mesh, None, None);
        object.bind_material(material);
        self.push_object(handle, object);
        self.refresh_node(handle);

        self.sky = Some(handle);
        self.sky_dynamic = dynamic;
        Ok(handle)
    }

    /// Replaces the singleton water node: a full-static plane at
    /// `position.y`, scaled to `size`, refreshed synchronously.
    pub fn create_water(&mut self, position: Vec3, size: Vec3) -> Result<NodeHandle> {
        let mesh = self.assets.resolve_mesh("water")?;

        if let Some(old) = self.water.take() {
            self.remove_node(old);
        }

        let handle = self.create_node(Vec3::ZERO);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_full_static(true);
        }

        let mut object = Object::with_mesh(&self.assets, mesh, None, None);
        object.set_position(position);
        object.set_size(size);
        self.push_object(handle, object);
        self.refresh_node(handle);

        self.water = Some(handle);
        self.water_level = position.y;
        Ok(handle)
    }

    /// Replaces the singleton terrain node, full-static, refreshed
    /// synchronously.
    pub fn create_terrain(&mut self, position: Vec3, size: Vec3) -> Result<NodeHandle> {
        let mesh = self.assets.resolve_mesh("terrain")?;
        let material = self.assets.resolve_material("terrain_mat")?;

        if let Some(old) = self.terrain.take() {
            self.remove_node(old);
        }

        let handle = self.create_node(position);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_full_static(true);
        }

        let mut object = Object::with_mesh(&self.assets, mesh, None, None);
        object.bind_material(material);
        object.set_size(size);
        self.push_object(handle, object);
        self.refresh_node(handle);

        self.terrain = Some(handle);
        Ok(handle)
    }

    /// Forwards the visible-block window to the terrain; no-op without one.
    pub fn update_visual_terrain(&mut self, block_x: i32, block_z: i32, size_x: i32, size_z: i32) {
        if self.terrain.is_none_or(|h| !self.nodes.contains_key(h)) {
            return;
        }
        self.terrain_window = Some(TerrainWindow {
            block_x,
            block_z,
            size_x,
            size_z,
        });
    }

    #[must_use]
    pub fn sky(&self) -> Option<NodeHandle> {
        self.sky
    }

    #[must_use]
    pub fn sky_dynamic(&self) -> bool {
        self.sky_dynamic
    }

    #[must_use]
    pub fn water(&self) -> Option<NodeHandle> {
        self.water
    }

    #[must_use]
    pub fn water_level(&self) -> f32 {
        self.water_level
    }

    #[must_use]
    pub fn terrain(&self) -> Option<NodeHandle> {
        self.terrain
    }

    #[must_use]
    pub fn terrain_window(&self) -> Option<TerrainWindow> {
        self.terrain_window
    }

    // ========================================================================
    // Reflection camera
    // ========================================================================

    /// Creates (or replaces) the reflection camera with the main camera's
    /// projection parameters.
    pub fn create_reflect_camera(&mut self) {
        self.reflect_camera = Some(Camera::new_perspective(
            self.main_camera.fovy.to_degrees(),
            self.main_camera.aspect,
            self.main_camera.near,
            self.main_camera.far,
        ));
    }

    /// Derives the reflection camera's view from the main camera, mirrored
    /// across the water plane `y = water_level`: a point at `y = level + d`
    /// is seen where `y = level - d` would be. The look direction's Y
    /// component is negated; X and Z are unchanged. No-op unless both water
    /// and a reflection camera exist.
    pub fn update_reflect_camera(&mut self) {
        if self.water.is_none_or(|h| !self.nodes.contains_key(h)) {
            return;
        }
        let Some(reflect) = self.reflect_camera.as_mut() else {
            return;
        };

        let level = self.water_level;
        let reflection = Mat4::from_translation(Vec3::new(0.0, 2.0 * level, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

        reflect.set_view_matrix(self.main_camera.view_matrix * reflection);

        let look = self.main_camera.look_dir;
        reflect.look_dir = Vec3::new(look.x, -look.y, look.z);
        let eye = self.main_camera.position;
        reflect.position = Vec3::new(eye.x, 2.0 * level - eye.y, eye.z);
    }

    // ========================================================================
    // Debug bounding boxes
    // ========================================================================

    /// Builds wireframe-box nodes mirroring the bounding volume of `handle`,
    /// every descendant, and each leaf node's per-object volumes. Purely
    /// additive: the source tree is untouched, and the created nodes accumulate
    /// until [`clear_all_aabb`](Self::clear_all_aabb).
    pub fn create_node_aabb(&mut self, handle: NodeHandle) -> Result<()> {
        let box_mesh = self.assets.resolve_mesh("box")?;
        let black_mat = self.assets.resolve_material("black")?;
        self.build_node_aabb(handle, box_mesh, black_mat);
        Ok(())
    }

    fn build_node_aabb(
        &mut self,
        handle: NodeHandle,
        box_mesh: MeshHandle,
        black_mat: MaterialHandle,
    ) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        let node_bounds = node.bounding;
        let children = node.children.clone();
        let leaf_object_bounds: Vec<BoundingBox> = if children.is_empty() {
            node.objects.iter().filter_map(|o| o.bounding).collect()
        } else {
            Vec::new()
        };

        if let Some(bounds) = node_bounds {
            self.spawn_debug_box(bounds, box_mesh, black_mat);
        }
        for child in children {
            self.build_node_aabb(child, box_mesh, black_mat);
        }
        for bounds in leaf_object_bounds {
            self.spawn_debug_box(bounds, box_mesh, black_mat);
        }
    }

    fn spawn_debug_box(
        &mut self,
        bounds: BoundingBox,
        box_mesh: MeshHandle,
        black_mat: MaterialHandle,
    ) {
        let handle = self.create_node(bounds.center());
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_dynamic_batch(false);
        }

        let mut object = Object::with_mesh(&self.assets, box_mesh, None, None);
        object.set_size(bounds.size());
        object.bind_material(black_mat);
        self.push_object(handle, object);
        self.refresh_node(handle);

        self.bounding_nodes.push(handle);
    }

    /// Disposes every debug box created by
    /// [`create_node_aabb`](Self::create_node_aabb).
    pub fn clear_all_aabb(&mut self) {
        let nodes = std::mem::take(&mut self.bounding_nodes);
        for handle in nodes {
            self.remove_node(handle);
        }
    }

    #[must_use]
    pub fn bounding_nodes(&self) -> &[NodeHandle] {
        &self.bounding_nodes
    }

    // ========================================================================
    // Instance accounting
    // ========================================================================

    /// Registers an object's resource usage in the instance tables. Called
    /// automatically when an object is attached to a node.
    pub fn add_object(&mut self, object: &Object) {
        self.instances.register(object);
    }

    /// Usage count for a mesh; never-seen meshes read as zero.
    pub fn query_mesh_count(&mut self, mesh: MeshHandle) -> u32 {
        self.instances.query_mesh_count(mesh)
    }

    /// Usage count for an animation clip; never-seen clips read as zero.
    pub fn query_animation_count(&mut self, animation: AnimationHandle) -> u32 {
        self.instances.query_animation_count(animation)
    }

    #[must_use]
    pub fn instances(&self) -> &InstanceTables {
        &self.instances
    }

    // ========================================================================
    // Animation play list
    // ========================================================================

    /// Appends a node to the ordered play list for centralized per-frame
    /// ticking (the ticking itself lives with the animation system).
    pub fn add_play(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            log::warn!("add_play on a dead node; ignored");
            return;
        }
        self.play_list.push(handle);
    }

    #[must_use]
    pub fn play_list(&self) -> &[NodeHandle] {
        &self.play_list
    }
}
