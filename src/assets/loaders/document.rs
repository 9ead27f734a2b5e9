//! Serde mirror of the JSON document.
//!
//! Only the shape of the JSON is checked here. Enumerated values stay as raw strings
//! or codes and cross-table indices stay unchecked; [`GltfLoader`](super::GltfLoader)
//! converts and validates them.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: AssetDoc,
    pub scene: Option<usize>,
    #[serde(default)]
    pub buffers: Vec<BufferDoc>,
    #[serde(default)]
    pub buffer_views: Vec<BufferViewDoc>,
    #[serde(default)]
    pub accessors: Vec<AccessorDoc>,
    #[serde(default)]
    pub cameras: Vec<CameraDoc>,
    #[serde(default)]
    pub samplers: Vec<SamplerDoc>,
    #[serde(default)]
    pub images: Vec<ImageDoc>,
    #[serde(default)]
    pub textures: Vec<TextureDoc>,
    #[serde(default)]
    pub materials: Vec<MaterialDoc>,
    #[serde(default)]
    pub meshes: Vec<MeshDoc>,
    #[serde(default)]
    pub nodes: Vec<NodeDoc>,
    #[serde(default)]
    pub scenes: Vec<SceneDoc>,
    #[serde(default)]
    pub animations: Vec<AnimationDoc>,
    #[serde(default)]
    pub extensions: DocumentExtensions,
    #[serde(default)]
    pub extras: DocumentExtras,
}

#[derive(Debug, Deserialize)]
pub struct AssetDoc {
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

// --- Byte store ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferDoc {
    pub byte_length: usize,
    pub uri: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferViewDoc {
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    pub byte_stride: Option<usize>,
    pub target: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorDoc {
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: u32,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub min: Vec<f32>,
    #[serde(default)]
    pub max: Vec<f32>,
    pub name: Option<String>,
}

// --- Entity tables ---

#[derive(Debug, Deserialize)]
pub struct CameraDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub perspective: Option<PerspectiveDoc>,
    pub orthographic: Option<OrthographicDoc>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveDoc {
    pub aspect_ratio: Option<f32>,
    pub yfov: f32,
    pub zfar: Option<f32>,
    pub znear: f32,
}

#[derive(Debug, Deserialize)]
pub struct OrthographicDoc {
    pub xmag: f32,
    pub ymag: f32,
    pub zfar: f32,
    pub znear: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerDoc {
    pub mag_filter: Option<u32>,
    pub min_filter: Option<u32>,
    pub wrap_s: Option<u32>,
    pub wrap_t: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDoc {
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextureDoc {
    pub sampler: Option<usize>,
    pub source: Option<usize>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDoc {
    pub name: Option<String>,
    pub pbr_metallic_roughness: Option<PbrDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrDoc {
    pub base_color_factor: Option<[f32; 4]>,
    pub base_color_texture: Option<TextureInfoDoc>,
    pub metallic_factor: Option<f32>,
    pub roughness_factor: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct TextureInfoDoc {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct MeshDoc {
    pub name: Option<String>,
    pub primitives: Vec<PrimitiveDoc>,
    #[serde(default)]
    pub weights: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct PrimitiveDoc {
    pub attributes: BTreeMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
    pub mode: Option<u32>,
}

// --- Hierarchy ---

#[derive(Debug, Deserialize)]
pub struct NodeDoc {
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<usize>,
    pub camera: Option<usize>,
    pub mesh: Option<usize>,
    pub matrix: Option<[f32; 16]>,
    /// xyzw
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub translation: Option<[f32; 3]>,
    #[serde(default)]
    pub extensions: NodeExtensions,
    #[serde(default)]
    pub extras: NodeExtras,
}

#[derive(Debug, Default, Deserialize)]
pub struct NodeExtensions {
    #[serde(rename = "KHR_lights_punctual")]
    pub lights_punctual: Option<NodeLightDoc>,
}

#[derive(Debug, Deserialize)]
pub struct NodeLightDoc {
    pub light: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct NodeExtras {
    pub bounds: Option<usize>,
    #[serde(default)]
    pub scripts: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SceneDoc {
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<usize>,
}

// --- Animation ---

#[derive(Debug, Deserialize)]
pub struct AnimationDoc {
    pub name: Option<String>,
    pub channels: Vec<ChannelDoc>,
    pub samplers: Vec<AnimationSamplerDoc>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelDoc {
    pub sampler: usize,
    pub target: ChannelTargetDoc,
}

#[derive(Debug, Deserialize)]
pub struct ChannelTargetDoc {
    pub node: Option<usize>,
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct AnimationSamplerDoc {
    pub input: usize,
    pub output: usize,
    pub interpolation: Option<String>,
}

// --- Extensions & extras ---

#[derive(Debug, Default, Deserialize)]
pub struct DocumentExtensions {
    #[serde(rename = "KHR_lights_punctual")]
    pub lights_punctual: Option<LightsDoc>,
}

#[derive(Debug, Deserialize)]
pub struct LightsDoc {
    #[serde(default)]
    pub lights: Vec<LightDoc>,
}

#[derive(Debug, Deserialize)]
pub struct LightDoc {
    pub name: Option<String>,
    pub color: Option<[f32; 3]>,
    pub intensity: Option<f32>,
    pub range: Option<f32>,
    #[serde(rename = "type")]
    pub kind: String,
    pub spot: Option<SpotDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotDoc {
    pub inner_cone_angle: Option<f32>,
    pub outer_cone_angle: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentExtras {
    #[serde(default)]
    pub scripts: Vec<ScriptDoc>,
    #[serde(default)]
    pub shapes: Vec<ShapeDoc>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptDoc {
    pub uri: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShapeDoc {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "box")]
    pub box_shape: Option<BoxDoc>,
    pub sphere: Option<SphereDoc>,
}

#[derive(Debug, Deserialize)]
pub struct BoxDoc {
    pub a: [f32; 3],
    pub b: [f32; 3],
}

#[derive(Debug, Deserialize)]
pub struct SphereDoc {
    /// Center
    pub o: [f32; 3],
    /// Radius
    pub r: f32,
}
