use crate::error::WriterError;
use crate::placement::RasterPlacement;
use folio_layout::Fragment;
use folio_types::Bitmap;
use lopdf::ObjectId;
use std::io::{Seek, Write};

/// A trait for document renderers, abstracting the PDF-writing primitives.
///
/// Coordinates passed in are layout coordinates (millimetres, origin at the
/// top-left); page sizes are in PDF points.
pub trait DocumentRenderer<W: Write + Seek> {
    fn begin_document(&mut self, writer: W, title: &str) -> Result<(), WriterError>;

    /// Writes the text of one flow page as a content stream.
    fn render_fragments(
        &mut self,
        fragments: &[Fragment],
        page_height: f32,
    ) -> Result<ObjectId, WriterError>;

    /// Embeds `bitmap` and writes a content stream drawing it at `placement`.
    /// Returns the content stream and the image resource `(name, id)`.
    fn render_raster(
        &mut self,
        bitmap: &Bitmap,
        placement: &RasterPlacement,
        page_height: f32,
    ) -> Result<(ObjectId, (String, ObjectId)), WriterError>;

    fn write_page_object(
        &mut self,
        content_stream_ids: Vec<ObjectId>,
        images: Vec<(String, ObjectId)>,
        page_width: f32,
        page_height: f32,
    ) -> Result<ObjectId, WriterError>;

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, WriterError>;
}
