use crate::error::CaptureError;
use folio_style::StyleResolver;
use std::time::Duration;

/// How long to wait before a freshly mounted surface is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizationPolicy {
    /// Paint-cycle boundaries to yield to.
    pub frames: u32,
    /// Fixed delay after the last frame.
    pub settle_delay: Duration,
}

impl Default for StabilizationPolicy {
    fn default() -> Self {
        Self {
            frames: 2,
            settle_delay: Duration::from_millis(50),
        }
    }
}

/// A rendering environment that can clone a live visual subtree onto an
/// off-screen surface of unconstrained height.
///
/// `unmount` must be idempotent; [`crate::DetachedSurface`] calls it on
/// every exit path.
#[allow(async_fn_in_trait)]
pub trait SurfaceHost {
    type Target: ?Sized;
    type Surface: StyleResolver;

    /// Deep-clones `target` and attaches the clone off-screen.
    fn mount_detached(&self, target: &Self::Target) -> Result<Self::Surface, CaptureError>;

    fn unmount(&self, surface: &mut Self::Surface);

    /// Resolves at the next paint-cycle boundary.
    async fn next_frame(&self);

    /// Resolves once layout and computed style of `surface` are settled.
    ///
    /// The wait is bounded: `policy.frames` frames plus the settle delay,
    /// nothing else.
    async fn await_stable(&self, _surface: &Self::Surface, policy: &StabilizationPolicy) {
        for _ in 0..policy.frames {
            self.next_frame().await;
        }
        if !policy.settle_delay.is_zero() {
            tokio::time::sleep(policy.settle_delay).await;
        }
    }
}
