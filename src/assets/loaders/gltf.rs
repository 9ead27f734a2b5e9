use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::animation::{Animation, AnimationSampler, Channel, InterpolationMode, Target, TargetPath};
use crate::assets::io::{AssetReader, BufferSource, is_data_uri};
use crate::assets::loaders::document::{
    AccessorDoc, CameraDoc, Document, LightDoc, MeshDoc, NodeDoc, ShapeDoc,
};
use crate::assets::settings::{LoadSettings, SelfChildPolicy};
use crate::errors::{GltfError, Result};
use crate::gltf::{Asset, Gltf};
use crate::resources::accessor::{Accessor, ComponentType, Dimensions, strided_span};
use crate::resources::buffer::{Buffer, BufferTarget, BufferView};
use crate::resources::material::{Material, PbrMetallicRoughness};
use crate::resources::mesh::{Mesh, Mode, Primitive, Semantic};
use crate::resources::texture::{Filter, Image, Sampler, Texture, Wrapping};
use crate::scene::bounds::Shape;
use crate::scene::camera::{Camera, Projection};
use crate::scene::light::{Light, LightKind};
use crate::scene::node::Node;
use crate::scene::scene::Scene;
use crate::scene::script::Script;
use crate::scene::transform::Transform;

fn check_index(context: impl FnOnce() -> String, index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(GltfError::IndexOutOfRange {
            context: context(),
            index,
            len,
        })
    }
}

fn check_opt(context: impl FnOnce() -> String, index: Option<usize>, len: usize) -> Result<Option<usize>> {
    index.map(|i| check_index(context, i, len)).transpose()
}

// ============================================================================
// GltfLoader
// ============================================================================

/// Builds a [`Gltf`] from a JSON document.
///
/// Tables are built in dependency order and every cross-table index is validated
/// before the resolution pass runs, so a returned graph never holds a dangling index.
/// Buffer bytes are not read unless [`LoadSettings::preload_buffers`] is set.
#[derive(Debug, Clone, Default)]
pub struct GltfLoader {
    settings: LoadSettings,
}

impl GltfLoader {
    #[must_use]
    pub fn new(settings: LoadSettings) -> Self {
        Self { settings }
    }

    /// Reads the document at `path` through `reader`. Relative URIs resolve against
    /// the document's directory.
    pub fn load(&self, path: &Path, reader: Box<dyn AssetReader>) -> Result<Gltf> {
        let json = reader.read_to_end(path)?;
        let base_path = path.parent().unwrap_or(Path::new("")).to_path_buf();
        let gltf = self.parse(&json, base_path, reader)?;
        log::info!(
            "Loaded {}: {} nodes, {} meshes, {} accessors",
            path.display(),
            gltf.nodes.len(),
            gltf.meshes.len(),
            gltf.accessors.len()
        );
        Ok(gltf)
    }

    /// Builds a graph from document bytes already in memory.
    pub fn parse(&self, json: &[u8], base_path: PathBuf, reader: Box<dyn AssetReader>) -> Result<Gltf> {
        let doc: Document = serde_json::from_slice(json)?;
        let mut gltf = Gltf::with_boxed_reader(base_path, reader);

        gltf.asset = Asset {
            version: doc.asset.version.clone(),
            generator: doc.asset.generator.clone(),
            copyright: doc.asset.copyright.clone(),
        };

        // 1. Byte store
        Self::load_buffers(&doc, &mut gltf);
        Self::load_buffer_views(&doc, &mut gltf)?;
        Self::load_accessors(&doc, &mut gltf)?;

        // 2. Entity tables
        Self::load_cameras(&doc, &mut gltf)?;
        Self::load_textures(&doc, &mut gltf)?;
        Self::load_materials(&doc, &mut gltf)?;
        Self::load_meshes(&doc, &mut gltf)?;
        Self::load_lights(&doc, &mut gltf)?;
        Self::load_extras(&doc, &mut gltf)?;

        // 3. Hierarchy
        let children = self.validate_hierarchy(&doc)?;
        Self::load_nodes(&doc, children, &mut gltf)?;
        Self::load_scenes(&doc, &mut gltf)?;
        Self::load_animations(&doc, &mut gltf)?;

        gltf.resolve();

        if self.settings.preload_buffers {
            for index in 0..gltf.buffers.len() {
                gltf.get_buffer(index)?;
            }
        }

        Ok(gltf)
    }

    // --- Byte store ---

    fn load_buffers(doc: &Document, gltf: &mut Gltf) {
        for buffer in &doc.buffers {
            let source = match &buffer.uri {
                Some(uri) => BufferSource::from_uri(uri, &gltf.base_path),
                None => BufferSource::Resident,
            };
            let mut declared = Buffer::new(buffer.byte_length, source);
            declared.name.clone_from(&buffer.name);
            gltf.buffers.push(declared);
        }
    }

    fn load_buffer_views(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for (i, view) in doc.buffer_views.iter().enumerate() {
            let buffer = check_index(|| format!("bufferViews[{i}].buffer"), view.buffer, gltf.buffers.len())?;

            let available = gltf.buffers[buffer].byte_length;
            let end = view
                .byte_offset
                .checked_add(view.byte_length)
                .ok_or_else(|| GltfError::overflowing_range(view.byte_offset, available))?;
            if end > available {
                return Err(GltfError::AccessorOutOfBounds {
                    start: view.byte_offset,
                    end,
                    len: available,
                });
            }

            gltf.buffer_views.push(BufferView {
                buffer,
                byte_offset: view.byte_offset,
                byte_length: view.byte_length,
                byte_stride: view.byte_stride.unwrap_or(0),
                target: view.target.map(BufferTarget::try_from).transpose()?.unwrap_or_default(),
                name: view.name.clone(),
            });
        }
        Ok(())
    }

    fn load_accessors(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for (i, raw) in doc.accessors.iter().enumerate() {
            let accessor = Self::build_accessor(i, raw, gltf)?;
            gltf.accessors.push(accessor);
        }
        Ok(())
    }

    fn build_accessor(i: usize, raw: &AccessorDoc, gltf: &Gltf) -> Result<Accessor> {
        let buffer_view = check_opt(
            || format!("accessors[{i}].bufferView"),
            raw.buffer_view,
            gltf.buffer_views.len(),
        )?;

        let accessor = Accessor {
            buffer_view,
            byte_offset: raw.byte_offset,
            component_type: ComponentType::try_from(raw.component_type)?,
            count: raw.count,
            dimensions: Dimensions::from_str(&raw.kind)?,
            min: raw.min.clone(),
            max: raw.max.clone(),
            name: raw.name.clone(),
        };

        if let Some(view) = buffer_view {
            let view = &gltf.buffer_views[view];
            let stride = match view.byte_stride {
                0 => accessor.element_size(),
                stride => stride,
            };
            let end = strided_span(accessor.count, stride, accessor.element_size())
                .and_then(|span| accessor.byte_offset.checked_add(span))
                .ok_or_else(|| GltfError::overflowing_range(accessor.byte_offset, view.byte_length))?;
            if end > view.byte_length {
                return Err(GltfError::AccessorOutOfBounds {
                    start: accessor.byte_offset,
                    end,
                    len: view.byte_length,
                });
            }
        }

        Ok(accessor)
    }

    // --- Entity tables ---

    fn load_cameras(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for (i, camera) in doc.cameras.iter().enumerate() {
            gltf.cameras.push(Self::build_camera(i, camera)?);
        }
        Ok(())
    }

    fn build_camera(i: usize, raw: &CameraDoc) -> Result<Camera> {
        let projection = match raw.kind.as_str() {
            "perspective" => {
                let p = raw
                    .perspective
                    .as_ref()
                    .ok_or_else(|| GltfError::missing(format!("cameras[{i}]"), "perspective"))?;
                Projection::Perspective {
                    aspect_ratio: p.aspect_ratio,
                    yfov: p.yfov,
                    zfar: p.zfar,
                    znear: p.znear,
                }
            }
            "orthographic" => {
                let o = raw
                    .orthographic
                    .as_ref()
                    .ok_or_else(|| GltfError::missing(format!("cameras[{i}]"), "orthographic"))?;
                Projection::Orthographic {
                    xmag: o.xmag,
                    ymag: o.ymag,
                    zfar: o.zfar,
                    znear: o.znear,
                }
            }
            other => return Err(GltfError::unknown("camera.type", other)),
        };

        Ok(Camera {
            name: raw.name.clone(),
            projection,
        })
    }

    fn load_textures(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for sampler in &doc.samplers {
            gltf.samplers.push(Sampler {
                mag_filter: sampler.mag_filter.map(Filter::try_from).transpose()?,
                min_filter: sampler.min_filter.map(Filter::try_from).transpose()?,
                wrap_s: sampler.wrap_s.map(Wrapping::try_from).transpose()?.unwrap_or_default(),
                wrap_t: sampler.wrap_t.map(Wrapping::try_from).transpose()?.unwrap_or_default(),
                name: sampler.name.clone(),
            });
        }

        for (i, image) in doc.images.iter().enumerate() {
            let uri = image.uri.as_ref().map(|uri| {
                if is_data_uri(uri) {
                    uri.clone()
                } else {
                    gltf.base_path.join(uri).to_string_lossy().into_owned()
                }
            });
            gltf.images.push(Image {
                uri,
                mime_type: image.mime_type.clone(),
                buffer_view: check_opt(
                    || format!("images[{i}].bufferView"),
                    image.buffer_view,
                    gltf.buffer_views.len(),
                )?,
                name: image.name.clone(),
            });
        }

        for (i, texture) in doc.textures.iter().enumerate() {
            gltf.textures.push(Texture {
                sampler: check_opt(|| format!("textures[{i}].sampler"), texture.sampler, gltf.samplers.len())?,
                source: check_opt(|| format!("textures[{i}].source"), texture.source, gltf.images.len())?,
                name: texture.name.clone(),
            });
        }
        Ok(())
    }

    fn load_materials(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for (i, material) in doc.materials.iter().enumerate() {
            let mut pbr = PbrMetallicRoughness::default();
            if let Some(raw) = &material.pbr_metallic_roughness {
                if let Some(factor) = raw.base_color_factor {
                    pbr.base_color_factor = Vec4::from_array(factor);
                }
                if let Some(info) = &raw.base_color_texture {
                    pbr.base_color_texture = Some(check_index(
                        || format!("materials[{i}].baseColorTexture"),
                        info.index,
                        gltf.textures.len(),
                    )?);
                }
                pbr.metallic_factor = raw.metallic_factor.unwrap_or(pbr.metallic_factor);
                pbr.roughness_factor = raw.roughness_factor.unwrap_or(pbr.roughness_factor);
            }

            let mut built = Material {
                pbr,
                ..Default::default()
            };
            if let Some(name) = &material.name {
                built.name.clone_from(name);
            }
            gltf.materials.push(built);
        }
        Ok(())
    }

    fn load_meshes(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for (i, mesh) in doc.meshes.iter().enumerate() {
            let mesh = Self::build_mesh(i, mesh, gltf)?;
            gltf.meshes.push(mesh);
        }
        Ok(())
    }

    fn build_mesh(i: usize, raw: &MeshDoc, gltf: &Gltf) -> Result<Mesh> {
        let accessors = gltf.accessors.len();
        let mut mesh = Mesh {
            weights: raw.weights.clone(),
            ..Default::default()
        };
        if let Some(name) = &raw.name {
            mesh.name.clone_from(name);
        }

        for (p, primitive) in raw.primitives.iter().enumerate() {
            let mut built = Primitive {
                indices: check_opt(|| format!("meshes[{i}].primitives[{p}].indices"), primitive.indices, accessors)?,
                material: check_opt(
                    || format!("meshes[{i}].primitives[{p}].material"),
                    primitive.material,
                    gltf.materials.len(),
                )?,
                mode: primitive.mode.map(Mode::try_from).transpose()?.unwrap_or_default(),
                ..Default::default()
            };
            for (name, &accessor) in &primitive.attributes {
                let semantic = Semantic::from_str(name)?;
                let accessor = check_index(
                    || format!("meshes[{i}].primitives[{p}].attributes.{name}"),
                    accessor,
                    accessors,
                )?;
                built.attributes.insert(semantic, accessor);
            }
            mesh.primitives.push(built);
        }

        Ok(mesh)
    }

    fn load_lights(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        let Some(punctual) = &doc.extensions.lights_punctual else {
            return Ok(());
        };
        for light in &punctual.lights {
            gltf.lights.push(Self::build_light(light)?);
        }
        Ok(())
    }

    fn build_light(raw: &LightDoc) -> Result<Light> {
        let kind = match raw.kind.as_str() {
            "point" => LightKind::Point,
            "directional" => LightKind::Directional,
            "spot" => {
                let spot = raw.spot.as_ref();
                LightKind::Spot {
                    inner_cone_angle: spot.and_then(|s| s.inner_cone_angle).unwrap_or(0.0),
                    outer_cone_angle: spot
                        .and_then(|s| s.outer_cone_angle)
                        .unwrap_or(LightKind::DEFAULT_OUTER_CONE_ANGLE),
                }
            }
            other => return Err(GltfError::unknown("light.type", other)),
        };

        let mut light = Light {
            kind,
            range: raw.range,
            ..Default::default()
        };
        if let Some(name) = &raw.name {
            light.name.clone_from(name);
        }
        if let Some(color) = raw.color {
            light.color = Vec3::from_array(color);
        }
        if let Some(intensity) = raw.intensity {
            light.intensity = intensity;
        }
        Ok(light)
    }

    fn load_extras(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for script in &doc.extras.scripts {
            let mut built = Script::new(script.uri.as_str());
            if let Some(name) = &script.name {
                built.name.clone_from(name);
            }
            gltf.scripts.push(built);
        }

        for (i, shape) in doc.extras.shapes.iter().enumerate() {
            gltf.shapes.push(Self::build_shape(i, shape)?);
        }
        Ok(())
    }

    fn build_shape(i: usize, raw: &ShapeDoc) -> Result<Shape> {
        match raw.kind.as_str() {
            "box" => {
                let b = raw
                    .box_shape
                    .as_ref()
                    .ok_or_else(|| GltfError::missing(format!("extras.shapes[{i}]"), "box"))?;
                Ok(Shape::new_box(Vec3::from_array(b.a), Vec3::from_array(b.b)))
            }
            "sphere" => {
                let s = raw
                    .sphere
                    .as_ref()
                    .ok_or_else(|| GltfError::missing(format!("extras.shapes[{i}]"), "sphere"))?;
                Ok(Shape::new_sphere(Vec3::from_array(s.o), s.r))
            }
            other => Err(GltfError::unknown("shape type", other)),
        }
    }

    // --- Hierarchy ---

    /// Checks that the declared hierarchy is a forest and returns each node's
    /// children with self references handled per [`SelfChildPolicy`].
    fn validate_hierarchy(&self, doc: &Document) -> Result<Vec<Vec<usize>>> {
        let count = doc.nodes.len();
        let mut parents: Vec<Option<usize>> = vec![None; count];
        let mut children = Vec::with_capacity(count);

        for (i, node) in doc.nodes.iter().enumerate() {
            let mut kept = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                check_index(|| format!("nodes[{i}].children"), child, count)?;
                if child == i {
                    match self.settings.self_child_policy {
                        SelfChildPolicy::Reject => {
                            return Err(GltfError::InvalidHierarchy(format!(
                                "node {i} lists itself as a child"
                            )));
                        }
                        SelfChildPolicy::Drop => {
                            log::warn!("Node {i} lists itself as a child, dropping the entry");
                            continue;
                        }
                    }
                }
                if let Some(existing) = parents[child] {
                    return Err(GltfError::InvalidHierarchy(format!(
                        "node {child} has two parents ({existing} and {i})"
                    )));
                }
                parents[child] = Some(i);
                kept.push(child);
            }
            children.push(kept);
        }

        // Every node has at most one parent, so a cycle is a parent chain that never ends.
        for start in 0..count {
            let mut current = parents[start];
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if steps > count {
                    return Err(GltfError::InvalidHierarchy(format!(
                        "node {start} is part of a cycle"
                    )));
                }
                current = parents[parent];
            }
        }

        for (s, scene) in doc.scenes.iter().enumerate() {
            for &root in &scene.nodes {
                check_index(|| format!("scenes[{s}].nodes"), root, count)?;
                if let Some(parent) = parents[root] {
                    return Err(GltfError::InvalidHierarchy(format!(
                        "scene {s} lists node {root} as a root, but it is a child of node {parent}"
                    )));
                }
            }
        }

        Ok(children)
    }

    fn load_nodes(doc: &Document, children: Vec<Vec<usize>>, gltf: &mut Gltf) -> Result<()> {
        for ((i, raw), children_indices) in doc.nodes.iter().enumerate().zip(children) {
            let node = Self::build_node(i, raw, children_indices, gltf)?;
            gltf.nodes.push(node);
        }
        Ok(())
    }

    fn build_node(i: usize, raw: &NodeDoc, children_indices: Vec<usize>, gltf: &Gltf) -> Result<Node> {
        let mut node = Node {
            children_indices,
            ..Default::default()
        };
        if let Some(name) = &raw.name {
            node.name.clone_from(name);
        }

        node.transform = match raw.matrix {
            Some(matrix) => Transform::Matrix(Mat4::from_cols_array(&matrix)),
            None => Transform::Decomposed {
                translation: raw.translation.map_or(Vec3::ZERO, Vec3::from_array),
                rotation: raw.rotation.map_or(Quat::IDENTITY, Quat::from_array),
                scale: raw.scale.map_or(Vec3::ONE, Vec3::from_array),
            },
        };

        node.camera_index = check_opt(|| format!("nodes[{i}].camera"), raw.camera, gltf.cameras.len())?;
        node.mesh_index = check_opt(|| format!("nodes[{i}].mesh"), raw.mesh, gltf.meshes.len())?;
        node.light_index = check_opt(
            || format!("nodes[{i}].extensions.KHR_lights_punctual.light"),
            raw.extensions.lights_punctual.as_ref().map(|l| l.light),
            gltf.lights.len(),
        )?;
        node.bounds_index = check_opt(|| format!("nodes[{i}].extras.bounds"), raw.extras.bounds, gltf.shapes.len())?;
        node.scripts_indices = raw
            .extras
            .scripts
            .iter()
            .map(|&s| check_index(|| format!("nodes[{i}].extras.scripts"), s, gltf.scripts.len()))
            .collect::<Result<_>>()?;

        Ok(node)
    }

    fn load_scenes(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for scene in &doc.scenes {
            let mut built = Scene::default();
            if let Some(name) = &scene.name {
                built.name.clone_from(name);
            }
            built.nodes_indices.clone_from(&scene.nodes);
            gltf.scenes.push(built);
        }

        gltf.scene = match doc.scene {
            Some(index) => Some(check_index(|| "scene".to_string(), index, gltf.scenes.len())?),
            None if !gltf.scenes.is_empty() => Some(0),
            None => None,
        };
        Ok(())
    }

    fn load_animations(doc: &Document, gltf: &mut Gltf) -> Result<()> {
        for (a, raw) in doc.animations.iter().enumerate() {
            let mut animation = Animation::default();
            if let Some(name) = &raw.name {
                animation.name.clone_from(name);
            }

            for (s, sampler) in raw.samplers.iter().enumerate() {
                let accessors = gltf.accessors.len();
                animation.samplers.push(AnimationSampler {
                    input: check_index(|| format!("animations[{a}].samplers[{s}].input"), sampler.input, accessors)?,
                    output: check_index(|| format!("animations[{a}].samplers[{s}].output"), sampler.output, accessors)?,
                    interpolation: sampler
                        .interpolation
                        .as_deref()
                        .map(InterpolationMode::from_str)
                        .transpose()?
                        .unwrap_or_default(),
                });
            }

            for (c, channel) in raw.channels.iter().enumerate() {
                animation.channels.push(Channel {
                    sampler: check_index(
                        || format!("animations[{a}].channels[{c}].sampler"),
                        channel.sampler,
                        animation.samplers.len(),
                    )?,
                    target: Target {
                        node_index: check_opt(
                            || format!("animations[{a}].channels[{c}].target.node"),
                            channel.target.node,
                            gltf.nodes.len(),
                        )?,
                        node: None,
                        path: TargetPath::from_str(&channel.target.path)?,
                    },
                });
            }

            gltf.animations.push(animation);
        }
        Ok(())
    }
}
