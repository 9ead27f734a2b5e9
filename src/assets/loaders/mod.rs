pub mod document;
pub mod gltf;

pub use gltf::GltfLoader;
