//! Core rendering abstractions for document export.
//!
//! This crate provides the types shared by document writing backends:
//! - `ExportArtifact`, the single input of a document writer
//! - `RasterPlacement`, the scale-to-fit math for snapshot pages
//! - `DocumentRenderer` trait for abstracting PDF writing operations
//! - Error types and unit conversion helpers

mod artifact;
mod error;
mod placement;
mod traits;
pub mod utils;

pub use artifact::{ExportArtifact, FlowArtifact, RasterArtifact};
pub use error::WriterError;
pub use placement::RasterPlacement;
pub use traits::DocumentRenderer;
