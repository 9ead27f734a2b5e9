use glam::Vec4;

use crate::gltf::Gltf;
use crate::resources::texture::Texture;

/// Metallic-roughness parameters.
#[derive(Debug, Clone)]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Vec4,
    /// Index into [`Gltf::textures`]
    pub base_color_texture: Option<usize>,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: Vec4::ONE,
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
        }
    }
}

/// Surface appearance of a primitive.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub pbr: PbrMetallicRoughness,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            pbr: PbrMetallicRoughness::default(),
        }
    }
}

impl Material {
    #[must_use]
    pub fn get_base_color_texture<'a>(&self, gltf: &'a Gltf) -> Option<&'a Texture> {
        self.pbr.base_color_texture.map(|index| &gltf.textures[index])
    }
}
