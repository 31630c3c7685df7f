//! Builders turning domain results into a [`ContentModel`].
//!
//! Every builder is a pure function of its input: the same profile or
//! report always yields an identical tree.

mod market_fit;
mod persona;

pub use market_fit::{MarketFitReport, SegmentFit};
pub use persona::PersonaProfile;

use folio_types::{ContentBlock, ContentModel};
use serde::Serialize;
use std::fmt;

/// Shown in place of a missing domain value.
pub const PLACEHOLDER: &str = "Not specified";

/// What kind of document an export produces. Used as the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Persona,
    MarketFit,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Persona => "persona",
            DocumentKind::MarketFit => "market-fit",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain result that can be exported through the flow path.
pub trait ContentSource {
    fn kind(&self) -> DocumentKind;

    /// Document title, also slugged into the filename.
    fn title(&self) -> &str;

    fn to_content(&self) -> ContentModel;
}

// --- Shared block helpers ---

fn or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn field(label: &str, value: Option<&str>) -> ContentBlock {
    ContentBlock::key_value(label, or_placeholder(value))
}

/// A titled bullet section, or nothing when every item is blank.
fn bullet_section(title: &str, items: &[String]) -> Option<ContentBlock> {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(ContentBlock::section(
        title,
        vec![ContentBlock::bullets(items)],
    ))
}

fn text_section(title: &str, text: Option<&str>) -> Option<ContentBlock> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    Some(ContentBlock::section(
        title,
        vec![ContentBlock::paragraph(text)],
    ))
}
