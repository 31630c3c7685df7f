use crate::error::CaptureError;
use crate::host::SurfaceHost;
use std::ops::{Deref, DerefMut};

/// A mounted off-screen clone. Unmounted when dropped, whether the capture
/// succeeded, failed or unwound.
pub struct DetachedSurface<'h, H: SurfaceHost> {
    host: &'h H,
    surface: H::Surface,
}

impl<'h, H: SurfaceHost> DetachedSurface<'h, H> {
    pub fn mount(host: &'h H, target: &H::Target) -> Result<Self, CaptureError> {
        let surface = host.mount_detached(target)?;
        Ok(Self { host, surface })
    }
}

impl<H: SurfaceHost> Deref for DetachedSurface<'_, H> {
    type Target = H::Surface;

    fn deref(&self) -> &Self::Target {
        &self.surface
    }
}

impl<H: SurfaceHost> DerefMut for DetachedSurface<'_, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.surface
    }
}

impl<H: SurfaceHost> Drop for DetachedSurface<'_, H> {
    fn drop(&mut self) {
        log::debug!("Releasing detached surface");
        self.host.unmount(&mut self.surface);
    }
}
