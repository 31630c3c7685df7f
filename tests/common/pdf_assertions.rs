use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

/// Decodes a WinAnsi string as written by the document writer.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x95 => '\u{2022}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            0x91 => '\u{2018}',
            0x92 => '\u{2019}',
            0x93 => '\u{201c}',
            0x94 => '\u{201d}',
            0x80 => '\u{20ac}',
            _ => b as char,
        })
        .collect()
}

/// Every shown string on a page, in content-stream order.
pub fn page_lines(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return Vec::new();
    };
    let Ok(bytes) = doc.get_page_content(*page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&bytes) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(s, _)) => Some(decode_win_ansi(s)),
            _ => None,
        })
        .collect()
}

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page_num in 1..=doc.get_pages().len() as u32 {
        for line in page_lines(doc, page_num) {
            text.push_str(&line);
            text.push('\n');
        }
    }
    text
}

/// Number of image XObjects referenced from a page's resources.
pub fn page_image_count(doc: &LopdfDocument, page: u32) -> usize {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return 0;
    };
    doc.get_dictionary(*page_id)
        .ok()
        .and_then(|page| page.get(b"Resources").ok())
        .and_then(|res| res.as_dict().ok())
        .and_then(|res| res.get(b"XObject").ok())
        .and_then(|x| x.as_dict().ok())
        .map(|x| x.len())
        .unwrap_or(0)
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}
