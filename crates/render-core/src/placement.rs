use crate::error::WriterError;
use folio_types::PageGeometry;

/// Where a snapshot lands on its page, in page units (millimetres).
///
/// `x`/`y` are measured from the top-left page corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterPlacement {
    pub scale: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RasterPlacement {
    /// Scales the image uniformly to fit the content box and centers it on the page.
    ///
    /// The scale is `min(content_width / image_width, content_height / image_height)`,
    /// which exceeds 1 for small images. `allow_upscale = false` clamps it to 1.
    pub fn fit(
        image_width: u32,
        image_height: u32,
        geometry: &PageGeometry,
        allow_upscale: bool,
    ) -> Result<Self, WriterError> {
        if image_width == 0 || image_height == 0 {
            return Err(WriterError::EmptyImage {
                width: image_width,
                height: image_height,
            });
        }
        let (iw, ih) = (image_width as f32, image_height as f32);
        let mut scale = (geometry.content_width() / iw).min(geometry.content_height() / ih);
        if !allow_upscale {
            scale = scale.min(1.0);
        }
        let width = iw * scale;
        let height = ih * scale;
        Ok(Self {
            scale,
            x: (geometry.width() - width) / 2.0,
            y: (geometry.height() - height) / 2.0,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(content_width: f32, content_height: f32) -> PageGeometry {
        PageGeometry::new(content_width + 20.0, content_height + 20.0, 10.0).unwrap()
    }

    #[test]
    fn wide_image_is_limited_by_width() {
        let placement = RasterPlacement::fit(200, 100, &page(180.0, 250.0), true).unwrap();
        assert!((placement.scale - 0.9).abs() < 1e-6);
        assert!((placement.width - 180.0).abs() < 1e-4);
        assert!((placement.height - 90.0).abs() < 1e-4);
        assert!((placement.x - 10.0).abs() < 1e-4);
        assert!((placement.y - (270.0 - 90.0) / 2.0).abs() < 1e-4);
    }

    #[test]
    fn preserves_aspect_ratio() {
        let geometry = PageGeometry::a4();
        for (w, h) in [(1600, 900), (300, 2000), (17, 13), (5000, 5000)] {
            let p = RasterPlacement::fit(w, h, &geometry, true).unwrap();
            let source = w as f32 / h as f32;
            assert!((p.width / p.height - source).abs() / source < 1e-4);
            assert!(p.width <= geometry.content_width() + 1e-3);
            assert!(p.height <= geometry.content_height() + 1e-3);
        }
    }

    #[test]
    fn small_images_upscale_unless_clamped() {
        let geometry = PageGeometry::a4();
        let up = RasterPlacement::fit(90, 30, &geometry, true).unwrap();
        assert!(up.scale > 1.0);

        let clamped = RasterPlacement::fit(90, 30, &geometry, false).unwrap();
        assert_eq!(clamped.scale, 1.0);
        assert_eq!((clamped.width, clamped.height), (90.0, 30.0));
        assert_eq!(clamped.x, 60.0);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        assert!(RasterPlacement::fit(0, 10, &PageGeometry::a4(), true).is_err());
    }
}
