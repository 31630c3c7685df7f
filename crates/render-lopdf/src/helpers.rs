//! Standalone helpers turning layout output and bitmaps into `lopdf`
//! content streams and objects.

use folio_layout::Fragment;
use folio_render_core::utils::{flip_y, mm_to_pt, pdf_font_name, BOLD_FONT, REGULAR_FONT};
use folio_render_core::{RasterPlacement, WriterError};
use folio_style::FontWeight;
use folio_types::{Bitmap, Color};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};

/// Resource name of the regular face.
pub const REGULAR_FONT_KEY: &str = "F1";
/// Resource name of the bold face.
pub const BOLD_FONT_KEY: &str = "F2";

/// Font resources shared by every flow page: the two standard Type1 faces.
pub fn font_resources() -> Dictionary {
    let mut fonts = Dictionary::new();
    for (key, base_font) in [(REGULAR_FONT_KEY, REGULAR_FONT), (BOLD_FONT_KEY, BOLD_FONT)] {
        let font = dictionary! {
            "Type" => "Font", "Subtype" => "Type1", "BaseFont" => base_font, "Encoding" => "WinAnsiEncoding",
        };
        fonts.set(key, Object::Dictionary(font));
    }
    fonts
}

fn font_key(weight: FontWeight) -> &'static str {
    if pdf_font_name(weight) == BOLD_FONT {
        BOLD_FONT_KEY
    } else {
        REGULAR_FONT_KEY
    }
}

/// Draws every fragment at its stored position, size and weight.
///
/// `page_height` is in points; fragment geometry is in millimetres.
pub fn render_fragments_to_content(fragments: &[Fragment], page_height: f32) -> Content {
    let mut page_ctx = PageContext::new(page_height);
    for fragment in fragments {
        page_ctx.draw_text(fragment);
    }
    page_ctx.finish()
}

// --- Internal Page Drawing Context ---

#[derive(Default, Clone, PartialEq)]
struct LopdfPageRenderState {
    font_name: &'static str,
    font_size: f32,
}

struct PageContext {
    page_height: f32,
    content: Content,
    state: LopdfPageRenderState,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn set_font(&mut self, weight: FontWeight, font_size: f32) {
        let key = font_key(weight);
        if self.state.font_name != key || self.state.font_size != font_size {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(key.as_bytes().to_vec()), font_size.into()],
            ));
            self.state.font_name = key;
            self.state.font_size = font_size;
        }
    }

    fn draw_text(&mut self, fragment: &Fragment) {
        if fragment.text.trim().is_empty() {
            return;
        }
        let top = mm_to_pt(fragment.y);
        let line_height = mm_to_pt(fragment.line_height);
        let baseline_y = top + (line_height - fragment.font_size) / 2.0 + fragment.font_size * 0.8;
        let pdf_y = flip_y(baseline_y, self.page_height);

        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(fragment.weight, fragment.font_size);
        self.content.operations.push(Operation::new(
            "Td",
            vec![mm_to_pt(fragment.x).into(), pdf_y.into()],
        ));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&fragment.text), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }
}

/// Paints image resource `name` into the placement box.
pub fn render_raster_to_content(name: &str, placement: &RasterPlacement, page_height: f32) -> Content {
    let width = mm_to_pt(placement.width);
    let height = mm_to_pt(placement.height);
    let x = mm_to_pt(placement.x);
    let y = flip_y(mm_to_pt(placement.y + placement.height), page_height);
    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    }
}

/// Decodes `bitmap` and builds an uncompressed DeviceRGB image XObject, with
/// any alpha flattened over white.
pub fn image_xobject(bitmap: &Bitmap) -> Result<Stream, WriterError> {
    if bitmap.is_empty() {
        return Err(WriterError::EmptyImage {
            width: bitmap.width,
            height: bitmap.height,
        });
    }
    let decoded = image::load_from_memory(&bitmap.data)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    if (width, height) != (bitmap.width, bitmap.height) {
        log::warn!(
            "Bitmap reports {}x{} but decodes to {}x{}",
            bitmap.width,
            bitmap.height,
            width,
            height
        );
    }

    let white = Color::white();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in decoded.pixels() {
        let [r, g, b, a] = pixel.0;
        let flat = Color::rgba(r, g, b, a as f32 / 255.0).over(&white);
        rgb.extend_from_slice(&[flat.r, flat.g, flat.b]);
    }

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    Ok(Stream::new(dict, rgb))
}

/// Encodes text for a WinAnsiEncoding font. Characters outside the
/// encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
        '\t' | '\n' | '\r' => b' ',
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => b'?',
    }
}
