use serde::Serialize;
use thiserror::Error;

/// Errors raised when constructing geometry that cannot hold any content.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Page dimensions must be positive and finite, got {width:.2} x {height:.2}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("Margin {margin:.2} must be finite and non-negative")]
    InvalidMargin { margin: f32 },
    #[error("Margin {margin:.2} leaves no content width on a page {width:.2} wide")]
    NoContentWidth { width: f32, margin: f32 },
    #[error("Margin {margin:.2} leaves no content height on a page {height:.2} tall")]
    NoContentHeight { height: f32, margin: f32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Physical page size with a uniform margin, all in millimetres.
///
/// The content box (`width - 2*margin` by `height - 2*margin`) is always
/// non-empty; construction fails otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    width: f32,
    height: f32,
    margin: f32,
}

impl PageGeometry {
    pub const A4_WIDTH_MM: f32 = 210.0;
    pub const A4_HEIGHT_MM: f32 = 297.0;
    pub const DEFAULT_MARGIN_MM: f32 = 15.0;

    pub fn new(width: f32, height: f32, margin: f32) -> Result<Self, GeometryError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        if !margin.is_finite() || margin < 0.0 {
            return Err(GeometryError::InvalidMargin { margin });
        }
        if width - 2.0 * margin <= 0.0 {
            return Err(GeometryError::NoContentWidth { width, margin });
        }
        if height - 2.0 * margin <= 0.0 {
            return Err(GeometryError::NoContentHeight { height, margin });
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    /// A4 portrait with the default margin.
    pub fn a4() -> Self {
        Self {
            width: Self::A4_WIDTH_MM,
            height: Self::A4_HEIGHT_MM,
            margin: Self::DEFAULT_MARGIN_MM,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// The lowest y a fragment may reach without overflowing.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.content_width(),
            self.content_height(),
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
