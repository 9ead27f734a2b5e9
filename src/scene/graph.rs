//! Node hierarchy mutation and queries.
//!
//! Every mutation keeps both sides of the hierarchy in sync: the live `parent` /
//! `children` handles and the `children_indices` / `nodes_indices` position lists the
//! resolution pass rebuilds from. A resolution pass after any sequence of these
//! operations therefore reproduces the same hierarchy.
//!
//! Node positions are stable only while no node is removed from [`Gltf::nodes`];
//! the graph itself never removes nodes.

use glam::Mat4;

use crate::assets::Handle;
use crate::gltf::Gltf;
use crate::scene::node::Node;

impl Gltf {
    pub(crate) fn position_of(&self, handle: Handle<Node>) -> usize {
        self.nodes
            .index_of(handle)
            .unwrap_or_else(|| panic!("invalid handle {handle:?}"))
    }

    fn insert_node(&mut self, node: Node) -> Handle<Node> {
        let handle = self.nodes.push(node);
        self.nodes[handle].handle = Some(handle);
        handle
    }

    /// Allocates an unattached node: no parent, in no scene.
    pub fn create_node(&mut self, name: impl Into<String>) -> Handle<Node> {
        self.insert_node(Node::new(name))
    }

    /// Creates a node as the last child of `parent`.
    ///
    /// # Panics
    /// If `parent` is not a live node of this graph.
    pub fn create_child(&mut self, parent: Handle<Node>, name: impl Into<String>) -> Handle<Node> {
        assert!(self.nodes.contains(parent), "invalid handle {parent:?}");
        let child = self.create_node(name);
        self.link(parent, child);
        child
    }

    /// Creates a node as the last root of scene `scene`.
    ///
    /// # Panics
    /// If `scene` is out of range.
    pub fn create_scene_node(&mut self, scene: usize, name: impl Into<String>) -> Handle<Node> {
        assert!(scene < self.scenes.len(), "scene {scene} out of range");
        let node = self.create_node(name);
        let position = self.position_of(node);
        let scene = &mut self.scenes[scene];
        scene.nodes_indices.push(position);
        scene.nodes.push(node);
        node
    }

    /// Inserts a pre-built node, then runs a full resolution pass so its declared
    /// index fields become live references.
    pub fn add_node(&mut self, node: Node) -> Handle<Node> {
        let handle = self.insert_node(node);
        self.resolve();
        handle
    }

    /// Makes `child` the last child of `parent`, detaching it from its previous
    /// parent or scene root list first.
    ///
    /// # Panics
    /// If either handle is invalid, if `child == parent`, or if `child` is an
    /// ancestor of `parent`.
    pub fn add_child(&mut self, parent: Handle<Node>, child: Handle<Node>) {
        assert!(self.nodes.contains(parent), "invalid handle {parent:?}");
        assert!(self.nodes.contains(child), "invalid handle {child:?}");
        assert!(parent != child, "a node cannot be its own child");
        assert!(
            !self.is_ancestor(child, parent),
            "adding {child:?} under {parent:?} would create a cycle"
        );

        self.remove_from_parent(child);
        self.link(parent, child);
    }

    fn link(&mut self, parent: Handle<Node>, child: Handle<Node>) {
        let child_position = self.position_of(child);
        let parent_node = &mut self.nodes[parent];
        parent_node.children.push(child);
        parent_node.children_indices.push(child_position);
        self.nodes[child].parent = Some(parent);
    }

    /// Detaches `node` from its parent, or failing that from the root list of every
    /// scene that lists it. A node with neither is left untouched.
    ///
    /// Every scene is searched, not only [`Gltf::scene`], so a node moved by
    /// [`Gltf::add_child`] never stays a root of some other scene.
    ///
    /// # Panics
    /// If `node` is invalid.
    pub fn remove_from_parent(&mut self, node: Handle<Node>) {
        let position = self.position_of(node);

        if let Some(parent) = self.nodes[node].parent.take() {
            let parent_node = &mut self.nodes[parent];
            parent_node.children.retain(|&c| c != node);
            parent_node.children_indices.retain(|&i| i != position);
            return;
        }

        for scene in &mut self.scenes {
            if let Some(slot) = scene.nodes.iter().position(|&n| n == node) {
                scene.nodes.remove(slot);
            }
            if let Some(slot) = scene.nodes_indices.iter().position(|&i| i == position) {
                scene.nodes_indices.remove(slot);
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// # Panics
    /// If `node` is invalid.
    #[must_use]
    pub fn parent(&self, node: Handle<Node>) -> Option<Handle<Node>> {
        self.nodes[node].parent
    }

    /// # Panics
    /// If `node` is invalid.
    #[must_use]
    pub fn children(&self, node: Handle<Node>) -> &[Handle<Node>] {
        &self.nodes[node].children
    }

    /// `true` if `ancestor` is `node` itself or appears on its parent chain.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: Handle<Node>, node: Handle<Node>) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(Node::parent);
        }
        false
    }

    /// Every node below `root`, depth-first pre-order, `root` excluded.
    #[must_use]
    pub fn descendants(&self, root: Handle<Node>) -> Vec<Handle<Node>> {
        let mut out = Vec::new();
        let mut stack: Vec<Handle<Node>> = self.nodes[root].children.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            out.push(handle);
            stack.extend(self.nodes[handle].children.iter().rev().copied());
        }
        out
    }

    /// First node, in table order, named `name`.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<Handle<Node>> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(handle, _)| handle)
    }

    /// Index of the first scene whose root list reaches `node`.
    #[must_use]
    pub fn scene_of(&self, node: Handle<Node>) -> Option<usize> {
        let mut root = node;
        while let Some(parent) = self.nodes.get(root)?.parent {
            root = parent;
        }
        self.scenes.iter().position(|scene| scene.contains_root(root))
    }

    /// World matrix of `node`: its local matrix composed with every ancestor's.
    ///
    /// # Panics
    /// If `node` is invalid.
    #[must_use]
    pub fn absolute_matrix(&self, node: Handle<Node>) -> Mat4 {
        let mut matrix = self.nodes[node].matrix();
        let mut current = self.nodes[node].parent;
        while let Some(parent) = current {
            let parent_node = &self.nodes[parent];
            matrix = parent_node.matrix() * matrix;
            current = parent_node.parent;
        }
        matrix
    }
}
