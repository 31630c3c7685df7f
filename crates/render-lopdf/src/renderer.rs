use crate::helpers;
use crate::writer::PdfBuilder;
use folio_layout::Fragment;
use folio_render_core::{DocumentRenderer, RasterPlacement, WriterError};
use folio_types::Bitmap;
use lopdf::ObjectId;
use std::io::{Seek, Write};

/// The document being built and the sink it is saved into.
struct Session<W> {
    output: W,
    pdf: PdfBuilder,
}

/// A PDF renderer using the `lopdf` library. Objects are collected in a
/// [`PdfBuilder`] and written to the sink on [`DocumentRenderer::finish`].
pub struct LopdfRenderer<W: Write + Seek> {
    session: Option<Session<W>>,
    producer: String,
    image_count: usize,
}

impl<W: Write + Seek> LopdfRenderer<W> {
    pub fn new(producer: impl Into<String>) -> Self {
        Self {
            session: None,
            producer: producer.into(),
            image_count: 0,
        }
    }

    fn pdf_mut(&mut self) -> Result<&mut PdfBuilder, WriterError> {
        self.session
            .as_mut()
            .map(|session| &mut session.pdf)
            .ok_or_else(|| WriterError::Other("Document not started".into()))
    }

    fn save(&mut self, page_ids: &[ObjectId]) -> Result<W, WriterError> {
        let Session { mut output, pdf } = self.session.take().ok_or_else(|| {
            WriterError::Other("Document was never started with begin_document".into())
        })?;
        pdf.save(page_ids, &mut output)?;
        output.flush()?;
        Ok(output)
    }
}

impl<W: Write + Seek> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W, title: &str) -> Result<(), WriterError> {
        let mut pdf = PdfBuilder::new(helpers::font_resources());
        pdf.set_info(title, &self.producer);
        self.session = Some(Session { output: writer, pdf });
        self.image_count = 0;
        Ok(())
    }

    fn render_fragments(
        &mut self,
        fragments: &[Fragment],
        page_height: f32,
    ) -> Result<ObjectId, WriterError> {
        let content = helpers::render_fragments_to_content(fragments, page_height);
        Ok(self.pdf_mut()?.add_content(content)?)
    }

    fn render_raster(
        &mut self,
        bitmap: &Bitmap,
        placement: &RasterPlacement,
        page_height: f32,
    ) -> Result<(ObjectId, (String, ObjectId)), WriterError> {
        let image = helpers::image_xobject(bitmap)?;
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        let content = helpers::render_raster_to_content(&name, placement, page_height);

        let pdf = self.pdf_mut()?;
        let image_id = pdf.add_image(image);
        let content_id = pdf.add_content(content)?;
        log::debug!(
            "Embedded {}x{} bitmap as /{} at {:.1}x{:.1}mm",
            bitmap.width,
            bitmap.height,
            name,
            placement.width,
            placement.height
        );
        Ok((content_id, (name, image_id)))
    }

    fn write_page_object(
        &mut self,
        content_stream_ids: Vec<ObjectId>,
        images: Vec<(String, ObjectId)>,
        page_width: f32,
        page_height: f32,
    ) -> Result<ObjectId, WriterError> {
        let pdf = self.pdf_mut()?;
        Ok(pdf.add_page(content_stream_ids, images, page_width, page_height))
    }

    fn finish(mut self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, WriterError> {
        self.save(&page_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rendering_before_begin_is_an_error() {
        let mut renderer: LopdfRenderer<Cursor<Vec<u8>>> = LopdfRenderer::new("folio");
        assert!(matches!(
            renderer.render_fragments(&[], 842.0),
            Err(WriterError::Other(_))
        ));
    }

    #[test]
    fn finishes_an_empty_document_in_memory() {
        let mut renderer = LopdfRenderer::new("folio");
        renderer
            .begin_document(Cursor::new(Vec::new()), "Empty")
            .unwrap();
        let content = renderer.render_fragments(&[], 842.0).unwrap();
        let page = renderer
            .write_page_object(vec![content], vec![], 595.0, 842.0)
            .unwrap();
        let bytes = Box::new(renderer).finish(vec![page]).unwrap().into_inner();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn finishing_twice_is_an_error() {
        let mut renderer = LopdfRenderer::new("folio");
        renderer
            .begin_document(Cursor::new(Vec::new()), "Once")
            .unwrap();
        assert!(renderer.save(&[]).is_ok());
        assert!(matches!(renderer.save(&[]), Err(WriterError::Other(_))));
    }
}
