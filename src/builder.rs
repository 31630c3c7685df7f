use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::exporter::Exporter;
use chrono::NaiveDate;
use folio_capture::CaptureConfig;
use folio_layout::LayoutConfig;
use folio_render_lopdf::WriterConfig;
use folio_types::PageGeometry;

/// A builder for creating an [`Exporter`].
#[derive(Debug, Clone, Default)]
pub struct ExportBuilder {
    config: ExportConfig,
    date: Option<NaiveDate>,
}

impl ExportBuilder {
    /// Creates a new `ExportBuilder` with A4 pages and default settings.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_page_geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    /// Page size and uniform margin, in millimetres.
    pub fn with_page_size(self, width: f32, height: f32, margin: f32) -> Result<Self, ExportError> {
        let geometry = PageGeometry::new(width, height, margin)?;
        Ok(self.with_page_geometry(geometry))
    }

    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_capture_config(mut self, capture: CaptureConfig) -> Self {
        self.config.capture = capture;
        self
    }

    pub fn with_writer_config(mut self, writer: WriterConfig) -> Self {
        self.config.writer = writer;
        self
    }

    /// When `false`, snapshots smaller than the content box keep their natural size.
    pub fn with_allow_upscale(mut self, allow: bool) -> Self {
        self.config.writer.allow_upscale = allow;
        self
    }

    /// Text color substituted when a dropped `color` property would leave
    /// text unpainted. `None` drops it outright.
    pub fn with_fallback_text_color(mut self, color: Option<String>) -> Self {
        self.config.capture.normalizer.fallback_text_color = color;
        self
    }

    /// Pins the date used in filenames instead of today's.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Consumes the builder and creates the `Exporter`.
    pub fn build(self) -> Result<Exporter, ExportError> {
        self.config.validate()?;
        Exporter::new(self.config, self.date)
    }
}
