use glam::Mat4;

use crate::assets::Handle;
use crate::scene::bounds::Shape;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::script::Script;
use crate::scene::transform::Transform;
use crate::resources::mesh::Mesh;

/// A positioned entity in the node hierarchy.
///
/// # Hierarchy
///
/// - `children_indices`: declared child positions in the node table. This is what the
///   resolution pass rebuilds from, and what mutation operations keep up to date.
/// - `children` / `parent`: live handles derived from `children_indices`. After a
///   resolution pass they are exact inverses of each other.
///
/// # Attachments
///
/// Each optional attachment is stored twice: the raw document index (`*_index`) and
/// the live handle filled in by the resolution pass.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,

    // === Hierarchy ===
    pub(crate) handle: Option<Handle<Node>>,
    pub(crate) parent: Option<Handle<Node>>,
    pub(crate) children: Vec<Handle<Node>>,
    pub children_indices: Vec<usize>,

    // === Attachments ===
    pub camera_index: Option<usize>,
    pub(crate) camera: Option<Handle<Camera>>,
    pub mesh_index: Option<usize>,
    pub(crate) mesh: Option<Handle<Mesh>>,
    pub light_index: Option<usize>,
    pub(crate) light: Option<Handle<Light>>,
    pub bounds_index: Option<usize>,
    pub(crate) bounds: Option<Handle<Shape>>,
    pub scripts_indices: Vec<usize>,
    pub(crate) scripts: Vec<Handle<Script>>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            handle: None,
            parent: None,
            children: Vec::new(),
            children_indices: Vec::new(),
            camera_index: None,
            camera: None,
            mesh_index: None,
            mesh: None,
            light_index: None,
            light: None,
            bounds_index: None,
            bounds: None,
            scripts_indices: Vec::new(),
            scripts: Vec::new(),
        }
    }

    /// Handle of this node in its graph, once inserted.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> Option<Handle<Node>> {
        self.handle
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Handle<Node>> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Handle<Node>] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn camera(&self) -> Option<Handle<Camera>> {
        self.camera
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self) -> Option<Handle<Mesh>> {
        self.mesh
    }

    #[inline]
    #[must_use]
    pub fn light(&self) -> Option<Handle<Light>> {
        self.light
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Option<Handle<Shape>> {
        self.bounds
    }

    #[inline]
    #[must_use]
    pub fn scripts(&self) -> &[Handle<Script>] {
        &self.scripts
    }

    /// Local transform as a matrix.
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Unknown")
    }
}
