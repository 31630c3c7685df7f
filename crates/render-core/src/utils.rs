use folio_style::FontWeight;

/// PDF points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Standard Type1 face used for regular text.
pub const REGULAR_FONT: &str = "Helvetica";
/// Standard Type1 face used for weights of 600 and above.
pub const BOLD_FONT: &str = "Helvetica-Bold";

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Get the standard PDF font name for a weight
pub fn pdf_font_name(weight: FontWeight) -> &'static str {
    if weight.is_bold() {
        BOLD_FONT
    } else {
        REGULAR_FONT
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}
