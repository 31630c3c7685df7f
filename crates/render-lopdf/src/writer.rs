//! The PDF object graph of one export, held in a [`lopdf::Document`] until
//! every page is known.

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;

/// Collects pages, images and content streams for a single document.
///
/// Flow pages share one resources dictionary holding the standard fonts;
/// raster pages carry their own `XObject` resources.
pub struct PdfBuilder {
    document: Document,
    pages_id: ObjectId,
    fonts_id: ObjectId,
}

impl PdfBuilder {
    pub fn new(fonts: Dictionary) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let fonts_id = document.add_object(dictionary! { "Font" => fonts });
        Self {
            document,
            pages_id,
            fonts_id,
        }
    }

    /// Sets the Info dictionary referenced from the trailer.
    pub fn set_info(&mut self, title: &str, producer: &str) {
        let info = dictionary! {
            "Title" => text_string(title),
            "Producer" => text_string(producer),
        };
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);
    }

    pub fn add_content(&mut self, content: Content) -> Result<ObjectId, lopdf::Error> {
        let stream = Stream::new(Dictionary::new(), content.encode()?);
        Ok(self.document.add_object(stream))
    }

    pub fn add_image(&mut self, image: Stream) -> ObjectId {
        self.document.add_object(image)
    }

    /// Adds a page object. Pages without images use the shared font
    /// resources.
    pub fn add_page(
        &mut self,
        contents: Vec<ObjectId>,
        images: Vec<(String, ObjectId)>,
        width: f32,
        height: f32,
    ) -> ObjectId {
        let resources: Object = if images.is_empty() {
            self.fonts_id.into()
        } else {
            let mut xobjects = Dictionary::new();
            for (name, id) in images {
                xobjects.set(name.into_bytes(), Object::Reference(id));
            }
            dictionary! { "XObject" => xobjects }.into()
        };

        self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => contents.into_iter().map(Object::Reference).collect::<Vec<_>>(),
            "Resources" => resources,
        })
    }

    /// Links `page_ids`, in order, under the page tree and serializes the
    /// document into `output`.
    pub fn save<W: Write>(
        mut self,
        page_ids: &[ObjectId],
        output: &mut W,
    ) -> Result<(), lopdf::Error> {
        let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
        self.document.objects.insert(
            self.pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }
            .into(),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.save_to(output)?;
        Ok(())
    }
}

/// A PDF text string: plain ASCII as a literal, anything else as UTF-16BE
/// with a byte order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
