use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::errors::{GltfError, Result};
use crate::gltf::Gltf;
use crate::resources::accessor::Accessor;
use crate::resources::material::Material;

/// Vertex attribute semantic of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Semantic {
    Position,
    Normal,
    Tangent,
    TexCoord0,
    TexCoord1,
    Color0,
    Joints0,
    Weights0,
}

impl FromStr for Semantic {
    type Err = GltfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "POSITION" => Ok(Semantic::Position),
            "NORMAL" => Ok(Semantic::Normal),
            "TANGENT" => Ok(Semantic::Tangent),
            "TEXCOORD_0" => Ok(Semantic::TexCoord0),
            "TEXCOORD_1" => Ok(Semantic::TexCoord1),
            "COLOR_0" => Ok(Semantic::Color0),
            "JOINTS_0" => Ok(Semantic::Joints0),
            "WEIGHTS_0" => Ok(Semantic::Weights0),
            other => Err(GltfError::unknown("primitive attribute", other)),
        }
    }
}

/// Topology of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl TryFrom<u32> for Mode {
    type Error = GltfError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Mode::Points),
            1 => Ok(Mode::Lines),
            2 => Ok(Mode::LineLoop),
            3 => Ok(Mode::LineStrip),
            4 => Ok(Mode::Triangles),
            5 => Ok(Mode::TriangleStrip),
            6 => Ok(Mode::TriangleFan),
            other => Err(GltfError::unknown("primitive.mode", other)),
        }
    }
}

/// Geometry drawn with a single material.
#[derive(Debug, Clone, Default)]
pub struct Primitive {
    /// Accessor index per vertex attribute
    pub attributes: FxHashMap<Semantic, usize>,
    /// Accessor index of the index buffer
    pub indices: Option<usize>,
    /// Index into [`Gltf::materials`]
    pub material: Option<usize>,
    pub mode: Mode,
}

impl Primitive {
    #[must_use]
    pub fn get_attribute<'a>(&self, semantic: Semantic, gltf: &'a Gltf) -> Option<&'a Accessor> {
        self.attributes
            .get(&semantic)
            .map(|&index| gltf.accessor(index))
    }

    #[must_use]
    pub fn get_indices<'a>(&self, gltf: &'a Gltf) -> Option<&'a Accessor> {
        self.indices.map(|index| gltf.accessor(index))
    }

    #[must_use]
    pub fn get_material<'a>(&self, gltf: &'a Gltf) -> Option<&'a Material> {
        self.material.map(|index| &gltf.materials[index])
    }
}

/// Set of primitives to be rendered together.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub primitives: Vec<Primitive>,
    /// Default morph target weights
    pub weights: Vec<f32>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            primitives: Vec::new(),
            weights: Vec::new(),
        }
    }
}
