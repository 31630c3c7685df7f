//! PDF document writer using lopdf.
//!
//! This crate turns an [`folio_render_core::ExportArtifact`] into PDF bytes
//! by building a `lopdf` object graph, using the standard Type1 fonts so no
//! font data is embedded.

mod document;
mod helpers;
mod renderer;
mod writer;

pub use document::{DocumentWriter, WriterConfig, WrittenDocument};
pub use renderer::LopdfRenderer;
