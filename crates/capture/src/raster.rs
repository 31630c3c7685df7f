use crate::error::RasterError;
use folio_style::{NormalizedStyles, StyleResolver};
use folio_types::Bitmap;

/// Burns a normalized surface into a bitmap.
///
/// `scale` is the device pixel ratio; output dimensions are the surface's
/// natural size times `scale`.
pub trait Rasterizer<S: StyleResolver> {
    fn rasterize(
        &self,
        surface: &S,
        styles: &NormalizedStyles<S::Node>,
        scale: f32,
    ) -> Result<Bitmap, RasterError>;
}
