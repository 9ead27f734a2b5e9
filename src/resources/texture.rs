use crate::errors::{GltfError, Result};
use crate::gltf::Gltf;

/// Magnification / minification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl TryFrom<u32> for Filter {
    type Error = GltfError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            9728 => Ok(Filter::Nearest),
            9729 => Ok(Filter::Linear),
            9984 => Ok(Filter::NearestMipmapNearest),
            9985 => Ok(Filter::LinearMipmapNearest),
            9986 => Ok(Filter::NearestMipmapLinear),
            9987 => Ok(Filter::LinearMipmapLinear),
            other => Err(GltfError::unknown("sampler filter", other)),
        }
    }
}

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrapping {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

impl TryFrom<u32> for Wrapping {
    type Error = GltfError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            33071 => Ok(Wrapping::ClampToEdge),
            33648 => Ok(Wrapping::MirroredRepeat),
            10497 => Ok(Wrapping::Repeat),
            other => Err(GltfError::unknown("sampler wrapping", other)),
        }
    }
}

/// Filtering and wrapping applied when sampling a texture.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    pub mag_filter: Option<Filter>,
    pub min_filter: Option<Filter>,
    pub wrap_s: Wrapping,
    pub wrap_t: Wrapping,
    pub name: Option<String>,
}

/// Image data source. Pixels are never decoded here.
#[derive(Debug, Clone, Default)]
pub struct Image {
    /// Path resolved against the document directory, or a verbatim `data:` URI
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
    pub name: Option<String>,
}

/// Pairing of an image with a sampler.
#[derive(Debug, Clone, Default)]
pub struct Texture {
    /// Index into [`Gltf::samplers`]
    pub sampler: Option<usize>,
    /// Index into [`Gltf::images`]
    pub source: Option<usize>,
    pub name: Option<String>,
}

impl Texture {
    #[must_use]
    pub fn get_sampler<'a>(&self, gltf: &'a Gltf) -> Option<&'a Sampler> {
        self.sampler.map(|index| &gltf.samplers[index])
    }

    #[must_use]
    pub fn get_source<'a>(&self, gltf: &'a Gltf) -> Option<&'a Image> {
        self.source.map(|index| &gltf.images[index])
    }
}
