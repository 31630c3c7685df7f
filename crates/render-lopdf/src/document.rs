use crate::renderer::LopdfRenderer;
use folio_render_core::utils::mm_to_pt;
use folio_render_core::{
    DocumentRenderer, ExportArtifact, FlowArtifact, RasterArtifact, RasterPlacement, WriterError,
};
use folio_types::PageGeometry;
use std::io::Cursor;

/// Options for [`DocumentWriter`].
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Allow small snapshots to be scaled beyond their natural size.
    pub allow_upscale: bool,
    /// Written to the document Info `Producer` entry.
    pub producer: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            allow_upscale: true,
            producer: "folio".to_string(),
        }
    }
}

/// Bytes of a finished PDF plus its physical page count.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Turns one [`ExportArtifact`] into an in-memory PDF.
///
/// The artifact is only borrowed; no layout decisions are made here.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    geometry: PageGeometry,
    config: WriterConfig,
}

impl DocumentWriter {
    pub fn new(geometry: PageGeometry, config: WriterConfig) -> Self {
        Self { geometry, config }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn write(
        &self,
        artifact: &ExportArtifact,
        title: &str,
    ) -> Result<WrittenDocument, WriterError> {
        artifact.validate()?;

        let mut renderer: Box<dyn DocumentRenderer<Cursor<Vec<u8>>>> =
            Box::new(LopdfRenderer::new(self.config.producer.clone()));
        renderer.begin_document(Cursor::new(Vec::new()), title)?;

        let page_ids = match artifact {
            ExportArtifact::Raster(raster) => self.write_raster(renderer.as_mut(), raster)?,
            ExportArtifact::Flow(flow) => self.write_flow(renderer.as_mut(), flow)?,
        };
        let page_count = page_ids.len();
        let bytes = renderer.finish(page_ids)?.into_inner();

        log::info!(
            "Wrote {} document '{}': {} page(s), {} bytes",
            artifact.kind(),
            title,
            page_count,
            bytes.len()
        );
        Ok(WrittenDocument { bytes, page_count })
    }

    fn page_size_pt(&self) -> (f32, f32) {
        (
            mm_to_pt(self.geometry.width()),
            mm_to_pt(self.geometry.height()),
        )
    }

    fn write_raster(
        &self,
        renderer: &mut dyn DocumentRenderer<Cursor<Vec<u8>>>,
        raster: &RasterArtifact,
    ) -> Result<Vec<lopdf::ObjectId>, WriterError> {
        let placement = RasterPlacement::fit(
            raster.width(),
            raster.height(),
            &self.geometry,
            self.config.allow_upscale,
        )?;
        log::debug!(
            "Placing {}x{} snapshot at scale {:.3}",
            raster.width(),
            raster.height(),
            placement.scale
        );
        let (page_width, page_height) = self.page_size_pt();
        let (content_id, image) = renderer.render_raster(&raster.bitmap, &placement, page_height)?;
        let page_id =
            renderer.write_page_object(vec![content_id], vec![image], page_width, page_height)?;
        Ok(vec![page_id])
    }

    fn write_flow(
        &self,
        renderer: &mut dyn DocumentRenderer<Cursor<Vec<u8>>>,
        flow: &FlowArtifact,
    ) -> Result<Vec<lopdf::ObjectId>, WriterError> {
        let (page_width, page_height) = self.page_size_pt();
        let mut page_ids = Vec::with_capacity(flow.pages.len());
        for page in &flow.pages {
            let content_id = renderer.render_fragments(&page.fragments, page_height)?;
            let page_id =
                renderer.write_page_object(vec![content_id], vec![], page_width, page_height)?;
            page_ids.push(page_id);
        }
        Ok(page_ids)
    }
}
