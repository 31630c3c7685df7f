//! Report export engine.
//!
//! Domain results become a [`ContentModel`] and are either flowed across
//! fixed-size pages or, for an already rendered visual subtree, captured to
//! a bitmap and scaled onto one page. Both paths end in a PDF plus a
//! download filename.
//!
//! ```no_run
//! use folio::{ExportBuilder, PersonaProfile};
//!
//! let profile = PersonaProfile::from_json(r#"{"name": "Ada Park", "age": 34}"#)?;
//! let exporter = ExportBuilder::new().build()?;
//! let document = exporter.export_flow(&profile)?;
//! document.save_to(".")?;
//! # Ok::<(), folio::ExportError>(())
//! ```

pub mod builder;
pub mod config;
pub mod content;
pub mod error;
pub mod exporter;
pub mod filename;

pub use builder::ExportBuilder;
pub use config::ExportConfig;
pub use content::{
    ContentSource, DocumentKind, MarketFitReport, PersonaProfile, SegmentFit, PLACEHOLDER,
};
pub use error::ExportError;
pub use exporter::{ExportedDocument, Exporter};
pub use filename::export_filename;

// Re-export the building blocks callers commonly need
pub use folio_capture::{CaptureConfig, CaptureError, RasterCapture, Rasterizer, SurfaceHost};
pub use folio_layout::{FlowLayoutEngine, LayoutConfig, LayoutOverflow, Page};
pub use folio_render_lopdf::WriterConfig;
pub use folio_types::{ContentBlock, ContentModel, PageGeometry};
