#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_inception)]

//! In-memory glTF 2.0 asset graph.
//!
//! ```rust,ignore
//! let gltf = gltf_graph::load("models/scene.gltf")?;
//! for &root in gltf.default_scene().map(|s| s.nodes()).unwrap_or_default() {
//!     println!("{} at {}", gltf.nodes[root].name, gltf.absolute_matrix(root));
//! }
//! ```

pub mod animation;
pub mod assets;
pub mod errors;
pub mod gltf;
pub mod resources;
pub mod scene;

use std::path::Path;

pub use animation::{Animation, Channel, InterpolationMode, TargetPath};
pub use assets::{AssetReader, FileAssetReader, Handle, LoadSettings, SelfChildPolicy, Store};
pub use errors::{ErrorKind, GltfError, Result};
pub use gltf::{Asset, Gltf};
pub use resources::{Accessor, Buffer, BufferView, ComponentType, Dimensions, Material, Mesh, Primitive, Semantic, Texture};
pub use scene::{Camera, Light, LightKind, Node, Scene, Script, Shape, ShapeKind, Transform};

/// Loads the document at `path`, returning a fully resolved asset graph.
pub fn load(path: impl AsRef<Path>) -> Result<Gltf> {
    Gltf::load(path)
}
