use crate::error::CaptureError;
use crate::host::{StabilizationPolicy, SurfaceHost};
use crate::raster::Rasterizer;
use crate::surface::DetachedSurface;
use folio_style::{NormalizerConfig, StyleNormalizer};
use folio_types::Bitmap;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Device pixel ratio handed to the rasterizer.
    ///
    /// Defaults to `2.0` so text stays crisp once the bitmap is scaled onto a page.
    pub scale_factor: f32,
    pub stabilization: StabilizationPolicy,
    pub normalizer: NormalizerConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            stabilization: StabilizationPolicy::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), CaptureError> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(CaptureError::InvalidConfig(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}

/// Snapshots a visual subtree into a single bitmap.
pub struct RasterCapture<H, R> {
    host: H,
    rasterizer: R,
    normalizer: StyleNormalizer,
    config: CaptureConfig,
}

impl<H, R> RasterCapture<H, R>
where
    H: SurfaceHost,
    R: Rasterizer<H::Surface>,
{
    pub fn new(host: H, rasterizer: R, config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        Ok(Self {
            host,
            rasterizer,
            normalizer: StyleNormalizer::new(config.normalizer.clone()),
            config,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Clone, stabilize, normalize, rasterize. The clone is released on
    /// every exit path.
    ///
    /// An unsupported color reaching the rasterizer is reported, not retried.
    pub async fn capture(&self, target: &H::Target) -> Result<Bitmap, CaptureError> {
        log::info!("Starting snapshot capture");
        let mut surface = DetachedSurface::mount(&self.host, target)?;

        self.host
            .await_stable(&*surface, &self.config.stabilization)
            .await;

        let styles = self.normalizer.normalize(&mut *surface);
        if !styles.skipped().is_empty() || !styles.dropped().is_empty() {
            log::debug!(
                "Normalized {} node(s): {} property read(s) skipped, {} unsupported color(s) dropped",
                styles.records().len(),
                styles.skipped().len(),
                styles.dropped().len()
            );
        }

        let bitmap = self
            .rasterizer
            .rasterize(&*surface, &styles, self.config.scale_factor)?;

        log::info!(
            "Captured snapshot of {}x{} px",
            bitmap.width,
            bitmap.height
        );
        Ok(bitmap)
    }
}
