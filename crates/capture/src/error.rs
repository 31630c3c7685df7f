use thiserror::Error;

/// Failures of a [`crate::Rasterizer`].
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Unsupported color in '{property}': {value}")]
    UnsupportedColor { property: String, value: String },

    #[error("Surface has no paintable area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Failed to encode bitmap: {0}")]
    Encode(#[from] image::ImageError),
}

/// The raster path failed. The detached surface has been released by the
/// time this reaches the caller.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Could not detach the visual subtree: {reason}")]
    Detach { reason: String },

    #[error("Unsupported color survived normalization in '{property}': {value}")]
    UnsupportedColor { property: String, value: String },

    #[error("Rasterization failed: {0}")]
    Raster(RasterError),

    #[error("Invalid capture config: {0}")]
    InvalidConfig(String),
}

impl CaptureError {
    /// Stable machine-readable tag for the failure.
    pub fn cause(&self) -> &'static str {
        match self {
            CaptureError::Detach { .. } => "detach",
            CaptureError::UnsupportedColor { .. } => "unsupported-color",
            CaptureError::Raster(_) => "raster",
            CaptureError::InvalidConfig(_) => "config",
        }
    }
}

impl From<RasterError> for CaptureError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::UnsupportedColor { property, value } => {
                CaptureError::UnsupportedColor { property, value }
            }
            other => CaptureError::Raster(other),
        }
    }
}
