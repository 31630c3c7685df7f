use folio_capture::CaptureError;
use folio_layout::LayoutError;
use folio_render_core::WriterError;
use folio_types::GeometryError;
use thiserror::Error;

/// A comprehensive error type for the export pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid page geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Writing the document failed: {0}")]
    Writer(#[from] WriterError),

    #[error("Invalid domain input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
