use serde::Serialize;

/// One node of the exportable content tree.
///
/// The tree is framework independent: it is built once per export from
/// domain data and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBlock {
    Heading { text: String, level: u8 },
    Paragraph { text: String },
    KeyValue { label: String, value: String },
    BulletList { items: Vec<String> },
    Section {
        title: String,
        children: Vec<ContentBlock>,
    },
}

impl ContentBlock {
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        ContentBlock::Heading {
            text: text.into(),
            level: level.max(1),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    pub fn key_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        ContentBlock::KeyValue {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn bullets<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::BulletList {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<ContentBlock>) -> Self {
        ContentBlock::Section {
            title: title.into(),
            children,
        }
    }

    /// Short variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "Heading",
            ContentBlock::Paragraph { .. } => "Paragraph",
            ContentBlock::KeyValue { .. } => "KeyValue",
            ContentBlock::BulletList { .. } => "BulletList",
            ContentBlock::Section { .. } => "Section",
        }
    }

    /// Counts this block and every descendant.
    pub fn node_count(&self) -> usize {
        match self {
            ContentBlock::Section { children, .. } => {
                1 + children.iter().map(ContentBlock::node_count).sum::<usize>()
            }
            _ => 1,
        }
    }
}

/// The root of an export: a document title plus its top-level blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ContentModel {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl ContentModel {
    pub fn new(title: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.blocks.iter().map(ContentBlock::node_count).sum()
    }
}
