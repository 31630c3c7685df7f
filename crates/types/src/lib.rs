pub mod color;
pub mod document;
pub mod geometry;
pub mod image;

pub use color::Color;
pub use document::{ContentBlock, ContentModel};
pub use geometry::{GeometryError, PageGeometry, Rect};
pub use image::Bitmap;
