use folio_style::FontWeight;
use serde::Serialize;
use std::fmt;

/// One positioned line of text.
///
/// `x`/`y` are the top-left corner of the line box in millimetres from the
/// top-left of the page; `font_size` is in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub weight: FontWeight,
    pub line_height: f32,
}

impl Fragment {
    pub fn bottom(&self) -> f32 {
        self.y + self.line_height
    }
}

/// A finished page of fragments. Indices start at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub index: usize,
    pub fragments: Vec<Fragment>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fragments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Lowest fragment edge on the page, if any.
    pub fn content_bottom(&self) -> Option<f32> {
        self.fragments
            .iter()
            .map(Fragment::bottom)
            .fold(None, |acc, b| Some(acc.map_or(b, |a: f32| a.max(b))))
    }

    pub fn text(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.text.as_str())
    }
}

/// A block taller than a full page that was force-placed on its own page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOverflow {
    pub page_index: usize,
    pub block: &'static str,
    pub height: f32,
    pub available: f32,
}

impl fmt::Display for LayoutOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of height {:.2} exceeds page content height {:.2} on page {}",
            self.block, self.height, self.available, self.page_index
        )
    }
}

/// Output of one layout run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FlowLayout {
    pub pages: Vec<Page>,
    pub overflows: Vec<LayoutOverflow>,
}

impl FlowLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|p| p.fragments.len()).sum()
    }
}
