use std::fmt;

use glam::{Mat4, Vec3};
use rustc_hash::FxHashSet;

use crate::assets::Handle;
use crate::scene::node::Node;

/// Axis-aligned box given by two opposite corners in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub a: Vec3,
    pub b: Vec3,
}

impl BoxShape {
    /// `(min, max)` of both corners after transforming them by `matrix`.
    ///
    /// Corners may be declared in either order, and a mirroring matrix may swap them.
    #[must_use]
    pub fn world_extents(&self, matrix: Mat4) -> (Vec3, Vec3) {
        let a = matrix.transform_point3(self.a);
        let b = matrix.transform_point3(self.b);
        (a.min(b), a.max(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Box(BoxShape),
    Sphere(Sphere),
}

type CollisionCallback = Box<dyn FnMut(Handle<Shape>)>;

/// Hooks invoked by whoever drives collision detection.
#[derive(Default)]
pub struct CollisionCallbacks {
    pub on_begin: Option<CollisionCallback>,
    pub on_continue: Option<CollisionCallback>,
    pub on_end: Option<CollisionCallback>,
}

impl fmt::Debug for CollisionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionCallbacks")
            .field("on_begin", &self.on_begin.is_some())
            .field("on_continue", &self.on_continue.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

/// Bounding shape, optionally attached to a node through `extras.bounds`.
///
/// `matrix` is the world transform last pushed by [`Shape::set_matrix`]; the shape does
/// not track its node's transform on its own.
#[derive(Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub matrix: Mat4,
    pub(crate) node: Option<Handle<Node>>,
    pub collisions: FxHashSet<Handle<Shape>>,
    pub callbacks: CollisionCallbacks,
}

impl Shape {
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            matrix: Mat4::IDENTITY,
            node: None,
            collisions: FxHashSet::default(),
            callbacks: CollisionCallbacks::default(),
        }
    }

    #[must_use]
    pub fn new_box(a: Vec3, b: Vec3) -> Self {
        Self::new(ShapeKind::Box(BoxShape { a, b }))
    }

    #[must_use]
    pub fn new_sphere(center: Vec3, radius: f32) -> Self {
        Self::new(ShapeKind::Sphere(Sphere { center, radius }))
    }

    /// Node this shape bounds, if any.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<Handle<Node>> {
        self.node
    }

    #[inline]
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    /// Overlap test in world space using each shape's current matrix.
    ///
    /// Boxes are compared on the X and Y axes only. Spheres compare center distance with
    /// the sum of radii. A box never intersects a sphere.
    #[must_use]
    pub fn intersects(&self, other: &Shape) -> bool {
        match (&self.kind, &other.kind) {
            (ShapeKind::Box(this), ShapeKind::Box(that)) => {
                let (min, max) = this.world_extents(self.matrix);
                let (other_min, other_max) = that.world_extents(other.matrix);
                min.x < other_max.x && max.x > other_min.x && min.y < other_max.y && max.y > other_min.y
            }
            (ShapeKind::Sphere(this), ShapeKind::Sphere(that)) => {
                let c = self.matrix.transform_point3(this.center);
                let oc = other.matrix.transform_point3(that.center);
                c.distance(oc) < this.radius + that.radius
            }
            _ => false,
        }
    }

    /// Records an ongoing collision. Returns `true` when it is new.
    pub fn add_collision(&mut self, other: Handle<Shape>) -> bool {
        self.collisions.insert(other)
    }

    /// Returns `true` when the collision was being tracked.
    pub fn remove_collision(&mut self, other: Handle<Shape>) -> bool {
        self.collisions.remove(&other)
    }

    #[must_use]
    pub fn is_colliding_with(&self, other: Handle<Shape>) -> bool {
        self.collisions.contains(&other)
    }
}
