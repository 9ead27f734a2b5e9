use crate::assets::Handle;
use crate::scene::node::Node;

/// A named set of root nodes.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    /// Root positions in the node table
    pub nodes_indices: Vec<usize>,
    pub(crate) nodes: Vec<Handle<Node>>,
}

impl Scene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes_indices: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Root nodes, in declaration order.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Handle<Node>] {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn contains_root(&self, node: Handle<Node>) -> bool {
        self.nodes.contains(&node)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("default")
    }
}
