use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// A single property could not be read from the host.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot resolve '{property}': {reason}")]
pub struct StyleReadError {
    pub property: String,
    pub reason: String,
}

impl StyleReadError {
    pub fn new(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Read access to the resolved style of a visual subtree, plus the ability
/// to pin inline overrides onto it.
///
/// `resolve` must return the effective value after cascade and inheritance,
/// not the authored value. `Ok(None)` means the property has no value at all.
pub trait StyleResolver {
    type Node: Copy + Eq + Hash + Debug;

    fn root(&self) -> Self::Node;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn resolve(&self, node: Self::Node, property: &str) -> Result<Option<String>, StyleReadError>;

    fn set_inline(&mut self, node: Self::Node, property: &str, value: &str);

    /// All nodes of the subtree in depth-first pre-order, root first.
    fn descendants(&self) -> Vec<Self::Node> {
        let mut order = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            order.push(node);
            let mut children = self.children(node);
            children.reverse();
            stack.extend(children);
        }
        order
    }
}
