//! Byte store and entity tables
//!
//! Plain data, addressed by position from the document:
//! - Buffer / BufferView: raw bytes and sub-ranges of them
//! - Accessor: typed, strided view over a buffer view
//! - Mesh / Primitive, Material, Texture / Sampler / Image

pub mod accessor;
pub mod buffer;
pub mod material;
pub mod mesh;
pub mod texture;

pub use accessor::{Accessor, ComponentType, Dimensions};
pub use buffer::{Buffer, BufferTarget, BufferView};
pub use material::{Material, PbrMetallicRoughness};
pub use mesh::{Mesh, Mode, Primitive, Semantic};
pub use texture::{Filter, Image, Sampler, Texture, Wrapping};
