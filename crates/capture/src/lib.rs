//! Snapshot capture for the raster export path.
//!
//! A [`SurfaceHost`] clones a live visual subtree onto a detached surface,
//! [`RasterCapture`] waits for it to stabilize, normalizes its colors and
//! hands it to a [`Rasterizer`]. [`memory`] provides an in-process host.

pub mod capture;
pub mod error;
pub mod host;
pub mod memory;
pub mod raster;
pub mod surface;

pub use capture::{CaptureConfig, RasterCapture};
pub use error::{CaptureError, RasterError};
pub use host::{StabilizationPolicy, SurfaceHost};
pub use raster::Rasterizer;
pub use surface::DetachedSurface;
