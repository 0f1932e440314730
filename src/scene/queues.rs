//! Deferred queues and frame synchronization.
//!
//! Simulation logic marks nodes dirty or doomed from its own execution
//! context; the frame-preparation pass drains both queues once per frame.
//! The queues are the shared mutable state between those two parties, so
//! each sits behind its own mutex. Everything is scene-owned; there is no
//! process-global state, and independent scenes never contend.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::scene::NodeHandle;

/// The pending-update and pending-removal queues of one scene.
///
/// Shared between the producing simulation context and the consuming frame
/// pass via `Arc`. Drains swap the backing vector out under the lock, so
/// producers are never blocked for the duration of the drain itself.
///
/// Duplicate entries are tolerated (recompute is idempotent, removal drains
/// check liveness); FIFO insertion order is preserved.
#[derive(Default)]
pub struct SceneQueues {
    updates: Mutex<Vec<NodeHandle>>,
    removals: Mutex<Vec<NodeHandle>>,
}

impl SceneQueues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_update(&self, handle: NodeHandle) {
        self.updates.lock().push(handle);
    }

    pub fn push_removal(&self, handle: NodeHandle) {
        self.removals.lock().push(handle);
    }

    /// Takes the queued updates in FIFO insertion order, leaving the queue
    /// empty.
    #[must_use]
    pub fn take_updates(&self) -> Vec<NodeHandle> {
        std::mem::take(&mut *self.updates.lock())
    }

    /// Takes the queued removals in FIFO insertion order, leaving the queue
    /// empty.
    #[must_use]
    pub fn take_removals(&self) -> Vec<NodeHandle> {
        std::mem::take(&mut *self.removals.lock())
    }

    #[must_use]
    pub fn has_pending_updates(&self) -> bool {
        !self.updates.lock().is_empty()
    }

    #[must_use]
    pub fn has_pending_removals(&self) -> bool {
        !self.removals.lock().is_empty()
    }
}

/// Gate between the frame-preparation pass and the renderer consuming its
/// output.
///
/// One bit behind a lock: "frame data prepared". Preparation may start only
/// while the bit is clear; the renderer clears it after consuming. The
/// `exiting` flag is polled cooperatively by both long-running activities;
/// there is no cancellation beyond whole-process shutdown.
#[derive(Default)]
pub struct FrameSync {
    prepared: Mutex<bool>,
    exiting: AtomicBool,
}

impl FrameSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the preparation slot. Returns false if the previous frame's
    /// data has not been consumed yet.
    #[must_use]
    pub fn begin_prepare(&self) -> bool {
        !*self.prepared.lock()
    }

    /// Marks the current frame's data ready for the renderer.
    pub fn mark_prepared(&self) {
        *self.prepared.lock() = true;
    }

    /// Marks the prepared data consumed, releasing the preparation slot.
    pub fn mark_consumed(&self) {
        *self.prepared.lock() = false;
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        *self.prepared.lock()
    }

    pub fn request_exit(&self) {
        self.exiting.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.exiting.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    use crate::scene::Node;

    #[test]
    fn drain_preserves_fifo_order() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let a = nodes.insert(Node::default());
        let b = nodes.insert(Node::default());
        let c = nodes.insert(Node::default());

        let queues = SceneQueues::new();
        queues.push_update(a);
        queues.push_update(b);
        queues.push_update(c);

        assert_eq!(queues.take_updates(), vec![a, b, c]);
        assert!(!queues.has_pending_updates());
    }

    #[test]
    fn frame_sync_gates_preparation() {
        let sync = FrameSync::new();
        assert!(sync.begin_prepare());

        sync.mark_prepared();
        assert!(!sync.begin_prepare(), "prepared data not yet consumed");

        sync.mark_consumed();
        assert!(sync.begin_prepare());
    }
}
