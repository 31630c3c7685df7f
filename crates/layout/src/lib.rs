use folio_types::GeometryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid layout config: '{field}' cannot be {value}")]
    InvalidConfig { field: &'static str, value: f32 },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub mod algorithms;
pub mod config;
pub(crate) mod engine;
pub mod page;
pub mod text;

pub use self::config::{LayoutConfig, PT_TO_MM};
pub use self::engine::FlowLayoutEngine;
pub use self::page::{FlowLayout, Fragment, LayoutOverflow, Page};

// Re-export geometry so callers need not depend on folio-types directly
pub use folio_types::{PageGeometry, Rect};

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod test_utils;
