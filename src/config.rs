use crate::error::ExportError;
use folio_capture::CaptureConfig;
use folio_layout::LayoutConfig;
use folio_render_lopdf::WriterConfig;
use folio_types::PageGeometry;

/// Everything an [`Exporter`](crate::Exporter) needs, in one place.
///
/// Defaults to an A4 page with a 15 mm margin.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub geometry: PageGeometry,
    pub layout: LayoutConfig,
    pub capture: CaptureConfig,
    pub writer: WriterConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            layout: LayoutConfig::default(),
            capture: CaptureConfig::default(),
            writer: WriterConfig::default(),
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ExportError> {
        self.layout.validate()?;
        self.capture.validate()?;
        Ok(())
    }
}
