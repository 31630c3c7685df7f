//! Style handling for the raster export path.
//!
//! A host exposes resolved (post-cascade) style through [`StyleResolver`];
//! [`StyleNormalizer`] walks a subtree and produces [`StyleRecord`]s that a
//! legacy rasterizer can consume safely.

pub mod font;
pub mod normalizer;
pub mod parsers;
pub mod record;
pub mod resolver;

pub use font::FontWeight;
pub use normalizer::{
    ColorDisposition, NormalizationSkip, NormalizedStyles, NormalizerConfig, StyleNormalizer,
    COLOR_PROPERTIES,
};
pub use parsers::{contains_modern_color_function, StyleParseError};
pub use record::StyleRecord;
pub use resolver::{StyleReadError, StyleResolver};
