use crate::error::WriterError;
use folio_layout::Page;
use folio_types::Bitmap;

/// A snapshot bitmap destined for a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterArtifact {
    pub bitmap: Bitmap,
}

impl RasterArtifact {
    pub fn new(bitmap: Bitmap) -> Self {
        Self { bitmap }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height
    }
}

/// Laid-out pages, written one physical page each.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowArtifact {
    pub pages: Vec<Page>,
}

impl FlowArtifact {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}

/// The single input of a document writer.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportArtifact {
    Raster(RasterArtifact),
    Flow(FlowArtifact),
}

impl ExportArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ExportArtifact::Raster(_) => "raster",
            ExportArtifact::Flow(_) => "flow",
        }
    }

    /// Rejects artifacts no document can be produced from.
    pub fn validate(&self) -> Result<(), WriterError> {
        match self {
            ExportArtifact::Raster(raster) => {
                if raster.bitmap.is_empty() {
                    return Err(WriterError::EmptyImage {
                        width: raster.width(),
                        height: raster.height(),
                    });
                }
            }
            ExportArtifact::Flow(flow) => {
                if flow.pages.is_empty() {
                    return Err(WriterError::NoPages);
                }
                for (i, page) in flow.pages.iter().enumerate() {
                    if page.index != i + 1 {
                        return Err(WriterError::PageOrder {
                            expected: i + 1,
                            found: page.index,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
