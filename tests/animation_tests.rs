//! Animation Integration Tests
//!
//! Tests for:
//! - Channel/sampler parsing and target resolution
//! - Keyframe extraction from accessors (strict float layouts)
//! - find_max_time / find_last_rotation
//! - Programmatic keyframes: add_rotation, append_rotation

use base64::Engine;
use glam::{Quat, Vec3};
use gltf_graph::animation::{Animation, InterpolationMode, TargetPath};
use gltf_graph::{Gltf, GltfError, LoadSettings};

fn data_uri(bytes: &[u8]) -> String {
    format!(
        "data:application/octet-stream;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Document with one node animated by a rotation and a translation channel.
///
/// Buffer layout: 3 times, 3 rotations (xyzw), 3 translations.
fn animated() -> Gltf {
    let times: [f32; 3] = [0.0, 0.5, 2.0];
    let rotations = [
        Quat::IDENTITY,
        Quat::from_rotation_y(1.0),
        Quat::from_rotation_x(0.25),
    ];
    let translations = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 2.0, 3.0)];

    let mut bytes: Vec<u8> = bytemuck::cast_slice::<f32, u8>(&times).to_vec();
    for q in rotations {
        bytes.extend_from_slice(bytemuck::cast_slice::<f32, u8>(&q.to_array()));
    }
    for t in translations {
        bytes.extend_from_slice(bytemuck::cast_slice::<f32, u8>(&t.to_array()));
    }
    assert_eq!(bytes.len(), 12 + 48 + 36);

    let json = format!(
        r#"{{
            "asset": {{ "version": "2.0" }},
            "nodes": [ {{ "name": "spinner" }}, {{ "name": "bystander" }} ],
            "buffers": [ {{ "byteLength": 96, "uri": "{uri}" }} ],
            "bufferViews": [
                {{ "buffer": 0, "byteLength": 12 }},
                {{ "buffer": 0, "byteOffset": 12, "byteLength": 48 }},
                {{ "buffer": 0, "byteOffset": 60, "byteLength": 36 }}
            ],
            "accessors": [
                {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "SCALAR" }},
                {{ "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC4" }},
                {{ "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC3" }},
                {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "VEC4" }}
            ],
            "animations": [
                {{
                    "name": "spin",
                    "samplers": [
                        {{ "input": 0, "output": 1 }},
                        {{ "input": 0, "output": 2, "interpolation": "STEP" }},
                        {{ "input": 0, "output": 3 }}
                    ],
                    "channels": [
                        {{ "sampler": 0, "target": {{ "node": 0, "path": "rotation" }} }},
                        {{ "sampler": 1, "target": {{ "node": 0, "path": "translation" }} }}
                    ]
                }},
                {{ "samplers": [], "channels": [] }}
            ]
        }}"#,
        uri = data_uri(&bytes)
    );

    Gltf::from_json(&json, std::env::temp_dir(), &LoadSettings::default()).unwrap()
}

fn spin(gltf: &Gltf) -> &Animation {
    &gltf.animations[0]
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn channels_resolve_to_target_nodes() {
    let gltf = animated();
    let animation = spin(&gltf);
    let spinner = gltf.find_node("spinner").unwrap();

    assert_eq!(animation.name, "spin");
    assert_eq!(gltf.animations[1].name, "Unknown");
    assert_eq!(animation.channels.len(), 2);
    for channel in &animation.channels {
        assert_eq!(channel.target.node(), Some(spinner));
        assert_eq!(channel.target.node_index, Some(0));
    }
    assert_eq!(animation.channels[0].target.path, TargetPath::Rotation);
    assert_eq!(animation.samplers[0].interpolation, InterpolationMode::Linear);
    assert_eq!(animation.samplers[1].interpolation, InterpolationMode::Step);
}

#[test]
fn unknown_target_path_is_rejected() {
    let err = Gltf::from_json(
        r#"{ "asset": { "version": "2.0" },
             "nodes": [ { } ],
             "accessors": [ { "componentType": 5126, "count": 0, "type": "SCALAR" } ],
             "animations": [ {
                 "samplers": [ { "input": 0, "output": 0 } ],
                 "channels": [ { "sampler": 0, "target": { "node": 0, "path": "color" } } ]
             } ] }"#,
        std::env::temp_dir(),
        &LoadSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GltfError::UnknownValue { kind: "channel.target.path", .. }));
}

// ============================================================================
// Keyframe extraction
// ============================================================================

#[test]
fn reads_times_and_values() {
    let gltf = animated();
    let animation = spin(&gltf);

    assert_eq!(animation.get_times(0, &gltf).unwrap(), vec![0.0, 0.5, 2.0]);

    let rotations = animation.get_rotations(0, &gltf).unwrap();
    assert_eq!(rotations.len(), 3);
    assert!(rotations[1].abs_diff_eq(Quat::from_rotation_y(1.0), 1e-6));

    let translations = animation.get_translations(1, &gltf).unwrap();
    assert_eq!(translations[2], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(animation.get_scales(1, &gltf).unwrap(), translations);
}

#[test]
fn missing_sampler_yields_no_keyframes() {
    let gltf = animated();
    assert!(spin(&gltf).get_times(9, &gltf).unwrap().is_empty());
    assert!(spin(&gltf).get_rotations(9, &gltf).unwrap().is_empty());
}

#[test]
fn non_float_output_is_a_mismatch() {
    let gltf = animated();
    let err = spin(&gltf).get_rotations(2, &gltf).unwrap_err();
    assert!(matches!(err, GltfError::AccessorMismatch { .. }));

    // A VEC3 output is not a rotation either
    let err = spin(&gltf).get_rotations(1, &gltf).unwrap_err();
    assert!(matches!(err, GltfError::AccessorMismatch { .. }));
}

#[test]
fn max_time_and_last_rotation() {
    let gltf = animated();
    let animation = spin(&gltf);

    assert_eq!(animation.find_max_time(&gltf).unwrap(), 2.0);
    let last = animation.find_last_rotation(&gltf).unwrap();
    assert!(last.abs_diff_eq(Quat::from_rotation_x(0.25), 1e-6));

    let empty = &gltf.animations[1];
    assert_eq!(empty.find_max_time(&gltf).unwrap(), 0.0);
    assert_eq!(empty.find_last_rotation(&gltf).unwrap(), Quat::IDENTITY);
}

// ============================================================================
// Programmatic keyframes
// ============================================================================

#[test]
fn add_rotation_appends_resident_keyframes() {
    let mut gltf = Gltf::default();
    gltf.animations.push(Animation::new("turn"));
    let node = gltf.create_node("door");

    let quats = [Quat::IDENTITY, Quat::from_rotation_z(1.0)];
    let channel = gltf.add_rotation(0, node, &[0.0, 1.5], &quats);

    let animation = &gltf.animations[0];
    assert_eq!(channel, 0);
    assert_eq!(animation.channels[0].target.node(), Some(node));
    assert_eq!(animation.time.max, 1.5);
    assert_eq!(gltf.buffers.len(), 2);
    assert!(gltf.buffers.iter().all(|b| b.is_resident()));
    assert_eq!(gltf.buffer_views[1].byte_length, 32);

    assert_eq!(animation.get_times(0, &gltf).unwrap(), vec![0.0, 1.5]);
    assert_eq!(animation.get_rotations(0, &gltf).unwrap(), quats.to_vec());
}

#[test]
fn append_rotation_continues_from_last_key() {
    let mut gltf = animated();
    let bystander = gltf.find_node("bystander").unwrap();
    let target = Quat::from_rotation_z(0.5);

    let channel = gltf.append_rotation(0, bystander, 3.0, target).unwrap();

    let animation = spin(&gltf);
    assert_eq!(channel, 2);
    let sampler = animation.channels[channel].sampler;
    assert_eq!(sampler, 3);
    assert_eq!(animation.channels[channel].target.node(), Some(bystander));
    assert_eq!(animation.get_times(sampler, &gltf).unwrap(), vec![2.0, 3.0]);

    let rotations = animation.get_rotations(sampler, &gltf).unwrap();
    assert!(rotations[0].abs_diff_eq(Quat::from_rotation_x(0.25), 1e-6));
    assert_eq!(rotations[1], target);
    assert_eq!(animation.time.max, 3.0);
    assert_eq!(animation.find_max_time(&gltf).unwrap(), 3.0);
}

#[test]
fn append_rotation_on_empty_animation_starts_at_identity() {
    let mut gltf = Gltf::default();
    gltf.animations.push(Animation::default());
    let node = gltf.create_node("n");

    gltf.append_rotation(0, node, 1.0, Quat::from_rotation_y(1.0)).unwrap();

    let animation = &gltf.animations[0];
    assert_eq!(animation.get_times(0, &gltf).unwrap(), vec![0.0, 1.0]);
    assert_eq!(animation.get_rotations(0, &gltf).unwrap()[0], Quat::IDENTITY);
}

#[test]
#[should_panic(expected = "greater than current max time")]
fn append_rotation_before_end_panics() {
    let mut gltf = animated();
    let node = gltf.find_node("spinner").unwrap();
    let _ = gltf.append_rotation(0, node, 1.0, Quat::IDENTITY);
}

#[test]
#[should_panic(expected = "does not match")]
fn add_rotation_with_mismatched_lengths_panics() {
    let mut gltf = Gltf::default();
    gltf.animations.push(Animation::default());
    let node = gltf.create_node("n");
    gltf.add_rotation(0, node, &[0.0, 1.0], &[Quat::IDENTITY]);
}
