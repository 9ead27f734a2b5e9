//! Graph resolution pass.
//!
//! Turns the integer indices stored on nodes, scenes and animation channels into
//! live handles. The pass is idempotent and can run after any batch of mutations.
//!
//! Ordering:
//! 1. node `parent` / `children`, rebuilt from `children_indices`
//! 2. node attachments (camera, mesh, light, bounds, scripts) and shape back-links
//! 3. animation channel targets
//! 4. scene root lists, minus any root that now has a parent

use crate::assets::{Handle, Store};
use crate::gltf::Gltf;
use crate::scene::node::Node;

fn handle_at<T>(store: &Store<T>, index: usize, what: &str) -> Handle<T> {
    store
        .handle_at(index)
        .unwrap_or_else(|| panic!("{what} index {index} out of range ({} entries)", store.len()))
}

impl Gltf {
    /// Rebuilds every live cross-reference from stored indices.
    ///
    /// A node listing itself as a child, or a child claimed by a second parent, is
    /// dropped from `children_indices` with a warning. A scene root that gained a
    /// parent is dropped from the scene's root list, also with a warning.
    ///
    /// # Panics
    /// If a stored index points past the end of its table, or if `children_indices`
    /// form a cycle.
    pub fn resolve(&mut self) {
        let handles: Vec<Handle<Node>> = self.nodes.handles().collect();

        // --- 1. Hierarchy ---
        for &handle in &handles {
            let node = &mut self.nodes[handle];
            node.handle = Some(handle);
            node.parent = None;
            node.children.clear();
        }

        for (position, &parent) in handles.iter().enumerate() {
            let declared = std::mem::take(&mut self.nodes[parent].children_indices);
            let mut kept = Vec::with_capacity(declared.len());

            for index in declared {
                if index == position {
                    log::warn!("Node {position} lists itself as a child, dropping the entry");
                    continue;
                }
                let child = handle_at(&self.nodes, index, "child node");
                if let Some(existing) = self.nodes[child].parent {
                    log::warn!(
                        "Node {index} already has parent {existing:?}, ignoring claim by node {position}"
                    );
                    continue;
                }
                self.nodes[child].parent = Some(parent);
                self.nodes[parent].children.push(child);
                kept.push(index);
            }

            self.nodes[parent].children_indices = kept;
        }

        // Each node has at most one parent now, so a cycle is a parent chain longer
        // than the table.
        for (position, &start) in handles.iter().enumerate() {
            let mut current = self.nodes[start].parent;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                assert!(
                    steps <= handles.len(),
                    "node hierarchy contains a cycle through node {position}"
                );
                current = self.nodes[parent].parent;
            }
        }

        // --- 2. Attachments ---
        for shape in self.shapes.values_mut() {
            shape.node = None;
        }

        for &handle in &handles {
            let node = &self.nodes[handle];
            let camera = node.camera_index.map(|i| handle_at(&self.cameras, i, "camera"));
            let mesh = node.mesh_index.map(|i| handle_at(&self.meshes, i, "mesh"));
            let light = node.light_index.map(|i| handle_at(&self.lights, i, "light"));
            let bounds = node.bounds_index.map(|i| handle_at(&self.shapes, i, "shape"));
            let scripts = node
                .scripts_indices
                .iter()
                .map(|&i| handle_at(&self.scripts, i, "script"))
                .collect();

            let node = &mut self.nodes[handle];
            node.camera = camera;
            node.mesh = mesh;
            node.light = light;
            node.bounds = bounds;
            node.scripts = scripts;

            if let Some(shape) = bounds {
                self.shapes[shape].node = Some(handle);
            }
        }

        // --- 3. Animation targets ---
        for animation in &mut self.animations {
            for channel in &mut animation.channels {
                channel.target.node = channel
                    .target
                    .node_index
                    .map(|i| handle_at(&self.nodes, i, "animation target node"));
            }
        }

        // --- 4. Scene roots ---
        for (s, scene) in self.scenes.iter_mut().enumerate() {
            let mut roots = Vec::with_capacity(scene.nodes_indices.len());
            scene.nodes_indices.retain(|&i| {
                let root = handle_at(&self.nodes, i, "scene root node");
                if let Some(parent) = self.nodes[root].parent {
                    log::warn!("Scene {s} root node {i} now has parent {parent:?}, dropping it from the root list");
                    return false;
                }
                roots.push(root);
                true
            });
            scene.nodes = roots;
        }

        log::debug!(
            "Resolved {} nodes, {} animations, {} scenes",
            handles.len(),
            self.animations.len(),
            self.scenes.len()
        );
    }
}
