use std::fmt;
use std::path::{Path, PathBuf};

use crate::animation::Animation;
use crate::assets::io::{AssetReader, FileAssetReader};
use crate::assets::loaders::GltfLoader;
use crate::assets::settings::LoadSettings;
use crate::assets::{Handle, Store};
use crate::errors::Result;
use crate::resources::accessor::Accessor;
use crate::resources::buffer::{Buffer, BufferView};
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::resources::texture::{Image, Sampler, Texture};
use crate::scene::bounds::Shape;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::scene::Scene;
use crate::scene::script::Script;

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            generator: None,
            copyright: None,
        }
    }
}

/// An in-memory asset graph.
///
/// Owns every table exclusively. Tables the document only ever addresses by position
/// (buffers, views, accessors, samplers, images, textures, materials, animations,
/// scenes) are plain vectors; tables that nodes reference through live handles are
/// [`Store`]s.
///
/// Handles issued by one graph are meaningless in another and never outlive it.
pub struct Gltf {
    pub asset: Asset,
    /// Directory relative buffer and image URIs resolve against
    pub base_path: PathBuf,
    reader: Box<dyn AssetReader>,

    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub samplers: Vec<Sampler>,
    pub images: Vec<Image>,
    pub textures: Vec<Texture>,
    pub materials: Vec<Material>,
    pub animations: Vec<Animation>,
    pub scenes: Vec<Scene>,

    pub cameras: Store<Camera>,
    pub meshes: Store<Mesh>,
    pub lights: Store<Light>,
    pub nodes: Store<Node>,
    pub shapes: Store<Shape>,
    pub scripts: Store<Script>,

    /// Index of the scene shown by default
    pub scene: Option<usize>,
}

impl Gltf {
    /// Empty graph reading files from disk relative to `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_reader(base_path, FileAssetReader)
    }

    #[must_use]
    pub fn with_reader(base_path: impl Into<PathBuf>, reader: impl AssetReader + 'static) -> Self {
        Self::with_boxed_reader(base_path.into(), Box::new(reader))
    }

    pub(crate) fn with_boxed_reader(base_path: PathBuf, reader: Box<dyn AssetReader>) -> Self {
        Self {
            asset: Asset::default(),
            base_path,
            reader,
            buffers: Vec::new(),
            buffer_views: Vec::new(),
            accessors: Vec::new(),
            samplers: Vec::new(),
            images: Vec::new(),
            textures: Vec::new(),
            materials: Vec::new(),
            animations: Vec::new(),
            scenes: Vec::new(),
            cameras: Store::new(),
            meshes: Store::new(),
            lights: Store::new(),
            nodes: Store::new(),
            shapes: Store::new(),
            scripts: Store::new(),
            scene: None,
        }
    }

    /// Loads the document at `path` with default settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &LoadSettings::default(), FileAssetReader)
    }

    /// Loads the document at `path`, reading it and its buffers through `reader`.
    pub fn load_with(
        path: impl AsRef<Path>,
        settings: &LoadSettings,
        reader: impl AssetReader + 'static,
    ) -> Result<Self> {
        GltfLoader::new(settings.clone()).load(path.as_ref(), Box::new(reader))
    }

    /// Builds a graph from an in-memory document. Relative URIs resolve against
    /// `base_path` and are read from disk.
    pub fn from_json(json: &str, base_path: impl Into<PathBuf>, settings: &LoadSettings) -> Result<Self> {
        GltfLoader::new(settings.clone()).parse(
            json.as_bytes(),
            base_path.into(),
            Box::new(FileAssetReader),
        )
    }

    #[inline]
    pub(crate) fn reader(&self) -> &dyn AssetReader {
        self.reader.as_ref()
    }

    // ========================================================================
    // Byte store
    // ========================================================================

    /// Buffer `index`, materialized on first access.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn get_buffer(&self, index: usize) -> Result<&Buffer> {
        let buffer = &self.buffers[index];
        buffer.materialize(self.reader())?;
        Ok(buffer)
    }

    /// Resident bytes of buffer `index`, materializing them if needed.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn buffer_data(&self, index: usize) -> Result<&[u8]> {
        self.buffers[index].materialize(self.reader())
    }

    /// # Panics
    /// If `index` is out of range.
    #[inline]
    #[must_use]
    pub fn buffer_view(&self, index: usize) -> &BufferView {
        &self.buffer_views[index]
    }

    /// # Panics
    /// If `index` is out of range.
    #[inline]
    #[must_use]
    pub fn accessor(&self, index: usize) -> &Accessor {
        &self.accessors[index]
    }

    // ========================================================================
    // Scenes
    // ========================================================================

    /// The scene selected by the document's `scene` field.
    #[must_use]
    pub fn default_scene(&self) -> Option<&Scene> {
        self.scene.and_then(|index| self.scenes.get(index))
    }

    /// Appends an empty scene and returns its index.
    pub fn add_scene(&mut self, name: impl Into<String>) -> usize {
        self.scenes.push(Scene::new(name));
        if self.scene.is_none() {
            self.scene = Some(0);
        }
        self.scenes.len() - 1
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: Handle<Node>) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: Handle<Node>) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Handle of the node at document position `index`.
    #[inline]
    #[must_use]
    pub fn node_at(&self, index: usize) -> Option<Handle<Node>> {
        self.nodes.handle_at(index)
    }
}

impl Default for Gltf {
    fn default() -> Self {
        Self::new(".")
    }
}

impl fmt::Debug for Gltf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gltf")
            .field("asset", &self.asset)
            .field("base_path", &self.base_path)
            .field("buffers", &self.buffers.len())
            .field("accessors", &self.accessors.len())
            .field("meshes", &self.meshes.len())
            .field("nodes", &self.nodes.len())
            .field("scenes", &self.scenes.len())
            .field("animations", &self.animations.len())
            .finish_non_exhaustive()
    }
}
