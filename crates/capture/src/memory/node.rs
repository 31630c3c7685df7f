use std::collections::BTreeMap;

/// A node of a live visual tree, with its authored (declared) styles.
///
/// ```ignore
/// let card = VisualNode::new()
///     .style("padding", "12px")
///     .style("background-color", "oklch(0.97 0.01 250)")
///     .child(VisualNode::new().text("Persona summary"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualNode {
    pub(crate) styles: BTreeMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<VisualNode>,
    pub(crate) failing: Vec<String>,
}

impl VisualNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    /// Makes reads of `property` fail, like an exotic feature the host
    /// cannot compute.
    pub fn failing_property(mut self, property: impl Into<String>) -> Self {
        self.failing.push(property.into());
        self
    }

    pub fn children(&self) -> &[VisualNode] {
        &self.children
    }
}
