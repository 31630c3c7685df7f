use crate::config::ExportConfig;
use crate::content::{ContentSource, DocumentKind};
use crate::error::ExportError;
use crate::filename::{export_filename, today};
use chrono::NaiveDate;
use folio_capture::{RasterCapture, Rasterizer, SurfaceHost};
use folio_layout::{FlowLayoutEngine, LayoutOverflow};
use folio_render_core::{ExportArtifact, FlowArtifact, RasterArtifact};
use folio_render_lopdf::DocumentWriter;
use folio_types::ContentModel;
use std::path::{Path, PathBuf};

/// A finished export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Blocks that were force-placed past the bottom margin. Always empty
    /// for snapshot exports.
    pub overflows: Vec<LayoutOverflow>,
}

impl ExportedDocument {
    /// Writes the document into `dir` under its own filename.
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        log::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Runs exports through either the flow path or the snapshot path.
///
/// Every call builds its own layout cursor, surface and writer, so an
/// `Exporter` can be shared by concurrent exports.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
    engine: FlowLayoutEngine,
    writer: DocumentWriter,
    date: Option<NaiveDate>,
}

impl Exporter {
    pub(crate) fn new(config: ExportConfig, date: Option<NaiveDate>) -> Result<Self, ExportError> {
        let engine = FlowLayoutEngine::new(config.geometry, config.layout)?;
        let writer = DocumentWriter::new(config.geometry, config.writer.clone());
        Ok(Self {
            config,
            engine,
            writer,
            date,
        })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Builds a [`RasterCapture`] around `host` using this exporter's capture settings.
    pub fn raster_capture<H, R>(&self, host: H, rasterizer: R) -> Result<RasterCapture<H, R>, ExportError>
    where
        H: SurfaceHost,
        R: Rasterizer<H::Surface>,
    {
        Ok(RasterCapture::new(host, rasterizer, self.config.capture.clone())?)
    }

    pub fn filename(&self, kind: DocumentKind, title: &str) -> String {
        export_filename(kind, title, self.date.unwrap_or_else(today))
    }

    /// Lays out a domain result and writes it as a multi-page document.
    pub fn export_flow<S: ContentSource + ?Sized>(&self, source: &S) -> Result<ExportedDocument, ExportError> {
        let model = source.to_content();
        self.export_content(&model, source.kind(), source.title())
    }

    /// Exports an already-built model, titled after `model.title`.
    pub fn export_model(&self, model: &ContentModel, kind: DocumentKind) -> Result<ExportedDocument, ExportError> {
        self.export_content(model, kind, &model.title)
    }

    fn export_content(
        &self,
        model: &ContentModel,
        kind: DocumentKind,
        title: &str,
    ) -> Result<ExportedDocument, ExportError> {
        log::info!("Starting {} flow export of {} block(s)", kind, model.node_count());
        let layout = self.engine.layout_model(model);

        let artifact = ExportArtifact::Flow(FlowArtifact::new(layout.pages));
        let written = self.writer.write(&artifact, &model.title)?;
        Ok(ExportedDocument {
            filename: self.filename(kind, title),
            bytes: written.bytes,
            page_count: written.page_count,
            overflows: layout.overflows,
        })
    }

    /// Captures `target` and writes the bitmap scaled onto a single page.
    pub async fn export_snapshot<H, R>(
        &self,
        capture: &RasterCapture<H, R>,
        target: &H::Target,
        kind: DocumentKind,
        title: &str,
    ) -> Result<ExportedDocument, ExportError>
    where
        H: SurfaceHost,
        R: Rasterizer<H::Surface>,
    {
        log::info!("Starting {} snapshot export", kind);
        let bitmap = capture.capture(target).await?;
        let artifact = ExportArtifact::Raster(RasterArtifact::new(bitmap));
        let written = self.writer.write(&artifact, title)?;
        Ok(ExportedDocument {
            filename: self.filename(kind, title),
            bytes: written.bytes,
            page_count: written.page_count,
            overflows: Vec::new(),
        })
    }
}
