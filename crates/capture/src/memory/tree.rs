use super::node::VisualNode;
use super::{CHAR_WIDTH_PX, LINE_HEIGHT_PX};
use folio_style::parsers::parse_color_value;
use folio_style::{StyleReadError, StyleResolver};
use folio_types::Rect;
use std::collections::BTreeMap;

/// Properties that fall back to the parent's computed value.
const INHERITED: &[&str] = &["color"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct TreeNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    declared: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
    failing: Vec<String>,
    text: Option<String>,
    rect: Rect,
    text_rect: Option<Rect>,
    text_lines: usize,
}

/// A deep clone of a [`VisualNode`] tree, laid out in an unconstrained-height
/// container `width` px wide.
///
/// Inline overrides written through [`StyleResolver::set_inline`] land on
/// the clone only; the live tree is never touched.
#[derive(Debug, Clone)]
pub struct DetachedTree {
    nodes: Vec<TreeNode>,
    mounted: bool,
}

impl DetachedTree {
    pub(crate) fn mount(root: &VisualNode, width: f32) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(count_nodes(root)),
            mounted: true,
        };
        let root_id = tree.push(root, None);
        tree.layout(root_id, 0.0, 0.0, width);
        tree
    }

    /// Returns whether the tree was still mounted.
    pub(crate) fn release(&mut self) -> bool {
        std::mem::replace(&mut self.mounted, false)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Natural size of the root box in CSS px.
    pub fn size(&self) -> (f32, f32) {
        self.nodes
            .first()
            .map_or((0.0, 0.0), |root| (root.rect.width, root.rect.height))
    }

    pub fn rect(&self, node: NodeId) -> Rect {
        self.nodes.get(node.0).map(|n| n.rect).unwrap_or_default()
    }

    pub fn text_rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node.0).and_then(|n| n.text_rect)
    }

    pub fn text_lines(&self, node: NodeId) -> usize {
        self.nodes.get(node.0).map_or(0, |n| n.text_lines)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|n| n.text.as_deref())
    }

    fn push(&mut self, node: &VisualNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            parent,
            children: Vec::with_capacity(node.children.len()),
            declared: node.styles.clone(),
            inline: BTreeMap::new(),
            failing: node.failing.clone(),
            text: node.text.clone(),
            rect: Rect::default(),
            text_rect: None,
            text_lines: 0,
        });
        for child in &node.children {
            let child_id = self.push(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn px(&self, id: NodeId, property: &str) -> Option<f32> {
        self.nodes[id.0]
            .declared
            .get(property)
            .and_then(|v| v.trim().trim_end_matches("px").trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
    }

    /// Block layout: children stack vertically, text wraps on an average
    /// glyph width. Returns the box height.
    fn layout(&mut self, id: NodeId, x: f32, y: f32, available: f32) -> f32 {
        let width = self
            .px(id, "width")
            .map_or(available, |w| w.min(available))
            .max(0.0);
        let padding = self.px(id, "padding").unwrap_or(0.0).max(0.0);
        let inner = (width - 2.0 * padding).max(1.0);
        let mut cursor = y + padding;

        if let Some(text) = self.nodes[id.0].text.as_deref() {
            let text_width = text.chars().count() as f32 * CHAR_WIDTH_PX;
            let lines = (text_width / inner).ceil().max(1.0) as usize;
            let height = lines as f32 * LINE_HEIGHT_PX;
            self.nodes[id.0].text_lines = lines;
            self.nodes[id.0].text_rect =
                Some(Rect::new(x + padding, cursor, text_width.min(inner), height));
            cursor += height;
        }

        let children = self.nodes[id.0].children.clone();
        for child in children {
            cursor += self.layout(child, x + padding, cursor, inner);
        }

        let natural = cursor - y + padding;
        let height = self.px(id, "height").unwrap_or(natural).max(0.0);
        self.nodes[id.0].rect = Rect::new(x, y, width, height);
        height
    }

    fn initial_value(&self, node: NodeId, property: &str) -> Result<Option<String>, StyleReadError> {
        match property {
            "color" => Ok(Some("rgb(0, 0, 0)".to_string())),
            "background-color" => Ok(Some("rgba(0, 0, 0, 0)".to_string())),
            "box-shadow" | "text-shadow" => Ok(Some("none".to_string())),
            // currentcolor
            "outline-color" => self.resolve(node, "color"),
            p if p.starts_with("border-") && p.ends_with("-color") => self.resolve(node, "color"),
            p if p.starts_with("border-") && p.ends_with("-style") => Ok(Some("none".to_string())),
            p if p.starts_with("border-") && p.ends_with("-width") => Ok(Some("0px".to_string())),
            _ => Ok(None),
        }
    }
}

impl StyleResolver for DetachedTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn resolve(&self, node: NodeId, property: &str) -> Result<Option<String>, StyleReadError> {
        let entry = self
            .nodes
            .get(node.0)
            .ok_or_else(|| StyleReadError::new(property, "node is not part of this surface"))?;

        if entry.failing.iter().any(|p| p == property) {
            return Err(StyleReadError::new(property, "value cannot be computed"));
        }
        if let Some(value) = entry.inline.get(property) {
            return Ok(Some(value.clone()));
        }
        if let Some(value) = entry.declared.get(property) {
            return Ok(Some(computed_form(value)));
        }
        if let Some(parent) = entry.parent.filter(|_| INHERITED.contains(&property)) {
            return self.resolve(parent, property);
        }
        self.initial_value(node, property)
    }

    fn set_inline(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.inline.insert(property.to_string(), value.to_string());
        }
    }
}

/// Legacy colors are reported as `rgb()`/`rgba()`, like a browser's computed
/// style; anything else is passed through.
fn computed_form(value: &str) -> String {
    match parse_color_value(value) {
        Ok(color) => color.to_string(),
        Err(_) => value.trim().to_string(),
    }
}

fn count_nodes(node: &VisualNode) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VisualNode {
        VisualNode::new()
            .style("color", "#336699")
            .style("padding", "10px")
            .child(VisualNode::new().text("Hello"))
            .child(
                VisualNode::new()
                    .style("height", "40px")
                    .style("border-top-width", "1px"),
            )
    }

    #[test]
    fn resolves_computed_colors_and_inheritance() {
        let tree = DetachedTree::mount(&sample(), 200.0);
        let root = tree.root();
        let first = tree.children(root)[0];

        assert_eq!(
            tree.resolve(root, "color").unwrap().as_deref(),
            Some("rgb(51, 102, 153)")
        );
        assert_eq!(
            tree.resolve(first, "color").unwrap().as_deref(),
            Some("rgb(51, 102, 153)")
        );
        assert_eq!(
            tree.resolve(first, "background-color").unwrap().as_deref(),
            Some("rgba(0, 0, 0, 0)")
        );
        assert_eq!(
            tree.resolve(first, "border-left-color").unwrap().as_deref(),
            Some("rgb(51, 102, 153)")
        );
        assert_eq!(tree.resolve(first, "font-family").unwrap(), None);
    }

    #[test]
    fn inline_overrides_win() {
        let mut tree = DetachedTree::mount(&sample(), 200.0);
        let root = tree.root();
        tree.set_inline(root, "color", "rgb(1, 2, 3)");
        let second = tree.children(root)[1];
        assert_eq!(
            tree.resolve(second, "color").unwrap().as_deref(),
            Some("rgb(1, 2, 3)")
        );
    }

    #[test]
    fn lays_out_natural_height() {
        let tree = DetachedTree::mount(&sample(), 200.0);
        // padding + one text line + fixed 40px child + padding
        assert_eq!(tree.size(), (200.0, 10.0 + LINE_HEIGHT_PX + 40.0 + 10.0));
        let text = tree.children(tree.root())[0];
        assert_eq!(tree.text_lines(text), 1);
        assert_eq!(tree.rect(text).x, 10.0);
    }

    #[test]
    fn release_reports_first_call_only() {
        let mut tree = DetachedTree::mount(&sample(), 200.0);
        assert!(tree.release());
        assert!(!tree.release());
        assert!(!tree.is_mounted());
    }
}
