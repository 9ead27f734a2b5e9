//! Bounds/Shape Integration Tests
//!
//! Tests for:
//! - Box overlap on transformed corners (X/Y only)
//! - Sphere overlap, mixed kinds
//! - Collision bookkeeping and caller-driven callbacks

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use gltf_graph::assets::Store;
use gltf_graph::scene::{Shape, ShapeKind};

fn flat_box(min: (f32, f32), max: (f32, f32)) -> Shape {
    Shape::new_box(Vec3::new(min.0, min.1, 0.0), Vec3::new(max.0, max.1, 0.0))
}

// ============================================================================
// Overlap
// ============================================================================

#[test]
fn overlapping_boxes_intersect() {
    let a = flat_box((0.0, 0.0), (2.0, 2.0));
    let b = flat_box((1.0, 1.0), (3.0, 3.0));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn distant_boxes_do_not_intersect() {
    let a = flat_box((0.0, 0.0), (1.0, 1.0));
    let c = flat_box((5.0, 5.0), (6.0, 6.0));
    assert!(!a.intersects(&c));
    assert!(!c.intersects(&a));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = flat_box((0.0, 0.0), (1.0, 1.0));
    let b = flat_box((1.0, 0.0), (2.0, 1.0));
    assert!(!a.intersects(&b));
}

#[test]
fn box_overlap_uses_each_matrix() {
    let a = flat_box((0.0, 0.0), (1.0, 1.0));
    let mut b = flat_box((0.0, 0.0), (1.0, 1.0));

    b.set_matrix(Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
    assert!(!a.intersects(&b));

    b.set_matrix(Mat4::from_translation(Vec3::new(0.5, 0.5, 0.0)));
    assert!(a.intersects(&b));
}

#[test]
fn reversed_corners_are_normalized() {
    let a = flat_box((2.0, 2.0), (0.0, 0.0));
    let b = flat_box((1.0, 1.0), (3.0, 3.0));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));

    let far = flat_box((6.0, 6.0), (5.0, 5.0));
    assert!(!a.intersects(&far));
}

#[test]
fn mirrored_box_uses_its_transformed_extents() {
    let mut a = flat_box((0.0, 0.0), (2.0, 2.0));
    a.set_matrix(Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    let b = flat_box((-1.0, 1.0), (1.0, 3.0));
    assert!(a.intersects(&b));

    // The mirror lands the box at x in [-2, 0], clear of x in [1, 3]
    let right = flat_box((1.0, 0.0), (3.0, 2.0));
    assert!(!a.intersects(&right));
}

#[test]
fn half_turn_keeps_overlap() {
    let mut a = flat_box((0.0, 0.0), (2.0, 2.0));
    a.set_matrix(Mat4::from_rotation_z(std::f32::consts::PI));
    let b = flat_box((-1.5, -1.5), (-0.5, -0.5));
    assert!(a.intersects(&b));
}

#[test]
fn box_overlap_ignores_depth() {
    let a = Shape::new_box(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    let b = Shape::new_box(Vec3::new(0.5, 0.5, 100.0), Vec3::new(1.5, 1.5, 101.0));
    assert!(a.intersects(&b));
}

#[test]
fn spheres_intersect_by_center_distance() {
    let a = Shape::new_sphere(Vec3::ZERO, 1.0);
    let mut b = Shape::new_sphere(Vec3::ZERO, 1.0);

    b.set_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, 1.5)));
    assert!(a.intersects(&b));

    b.set_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, 2.5)));
    assert!(!a.intersects(&b));
}

#[test]
fn box_and_sphere_never_intersect() {
    let a = flat_box((0.0, 0.0), (2.0, 2.0));
    let s = Shape::new_sphere(Vec3::new(1.0, 1.0, 0.0), 5.0);
    assert!(!a.intersects(&s));
    assert!(!s.intersects(&a));
}

#[test]
fn shape_kind_is_inspectable() {
    let s = Shape::new_sphere(Vec3::ONE, 2.0);
    match s.kind {
        ShapeKind::Sphere(sphere) => {
            assert_eq!(sphere.center, Vec3::ONE);
            assert_eq!(sphere.radius, 2.0);
        }
        ShapeKind::Box(_) => panic!("expected a sphere"),
    }
    assert!(s.node().is_none());
}

// ============================================================================
// Collision bookkeeping
// ============================================================================

#[test]
fn collision_set_tracks_peers() {
    let mut shapes = Store::new();
    let a = shapes.push(flat_box((0.0, 0.0), (2.0, 2.0)));
    let b = shapes.push(flat_box((1.0, 1.0), (3.0, 3.0)));

    assert!(shapes[a].add_collision(b));
    assert!(!shapes[a].add_collision(b), "second insert is not new");
    assert!(shapes[a].is_colliding_with(b));
    assert!(!shapes[b].is_colliding_with(a));

    assert!(shapes[a].remove_collision(b));
    assert!(!shapes[a].is_colliding_with(b));
    assert!(!shapes[a].remove_collision(b));
}

#[test]
fn callbacks_are_driven_by_caller() {
    let mut shapes = Store::new();
    let a = shapes.push(flat_box((0.0, 0.0), (2.0, 2.0)));
    let b = shapes.push(flat_box((1.0, 1.0), (3.0, 3.0)));

    let log = Rc::new(RefCell::new(Vec::new()));
    let begin_log = Rc::clone(&log);
    let end_log = Rc::clone(&log);
    shapes[a].callbacks.on_begin = Some(Box::new(move |_| begin_log.borrow_mut().push("begin")));
    shapes[a].callbacks.on_end = Some(Box::new(move |_| end_log.borrow_mut().push("end")));

    // One frame of a caller-side detection loop
    let touching = shapes[a].intersects(&shapes[b]);
    if touching && shapes[a].add_collision(b)
        && let Some(on_begin) = shapes[a].callbacks.on_begin.as_mut()
    {
        on_begin(b);
    }

    // Move apart and diff again
    shapes[b].set_matrix(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    let touching = shapes[a].intersects(&shapes[b]);
    if !touching && shapes[a].remove_collision(b)
        && let Some(on_end) = shapes[a].callbacks.on_end.as_mut()
    {
        on_end(b);
    }

    assert_eq!(*log.borrow(), vec!["begin", "end"]);
    assert!(shapes[a].collisions.is_empty());
}
