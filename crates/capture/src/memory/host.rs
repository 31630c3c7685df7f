use super::node::VisualNode;
use super::tree::DetachedTree;
use crate::error::CaptureError;
use crate::host::SurfaceHost;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handle to a live tree registered with a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

/// Holds live visual trees and tracks the detached clones made from them.
#[derive(Debug)]
pub struct MemoryHost {
    targets: Vec<VisualNode>,
    viewport_width: f32,
    mounted: AtomicUsize,
    total_mounts: AtomicUsize,
    frames: AtomicUsize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

    pub fn new() -> Self {
        Self::with_viewport_width(Self::DEFAULT_VIEWPORT_WIDTH)
    }

    pub fn with_viewport_width(viewport_width: f32) -> Self {
        Self {
            targets: Vec::new(),
            viewport_width,
            mounted: AtomicUsize::new(0),
            total_mounts: AtomicUsize::new(0),
            frames: AtomicUsize::new(0),
        }
    }

    pub fn insert(&mut self, tree: VisualNode) -> TargetId {
        self.targets.push(tree);
        TargetId(self.targets.len() - 1)
    }

    pub fn target(&self, id: TargetId) -> Option<&VisualNode> {
        self.targets.get(id.0)
    }

    /// Detached surfaces currently alive.
    pub fn mounted_count(&self) -> usize {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn total_mounts(&self) -> usize {
        self.total_mounts.load(Ordering::SeqCst)
    }

    pub fn frames_elapsed(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }
}

impl SurfaceHost for MemoryHost {
    type Target = TargetId;
    type Surface = DetachedTree;

    fn mount_detached(&self, target: &TargetId) -> Result<DetachedTree, CaptureError> {
        let live = self.targets.get(target.0).ok_or_else(|| CaptureError::Detach {
            reason: format!("unknown target #{}", target.0),
        })?;
        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            return Err(CaptureError::Detach {
                reason: format!("viewport width {} cannot hold a surface", self.viewport_width),
            });
        }

        let tree = DetachedTree::mount(live, self.viewport_width);
        self.mounted.fetch_add(1, Ordering::SeqCst);
        self.total_mounts.fetch_add(1, Ordering::SeqCst);
        log::debug!(
            "Mounted detached clone of target #{} ({} nodes)",
            target.0,
            tree.node_count()
        );
        Ok(tree)
    }

    fn unmount(&self, surface: &mut DetachedTree) {
        if surface.release() {
            self.mounted.fetch_sub(1, Ordering::SeqCst);
        }
    }

    async fn next_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}
