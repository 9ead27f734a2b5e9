//! Node/scene graph
//!
//! - Node: positioned entity with a local transform and optional attachments
//! - Scene: named set of root nodes
//! - Camera, Light, Script: entities a node can reference
//! - Shape: box or sphere collision volume bound to a node
//! - graph / resolve: hierarchy mutation and the resolution pass

pub mod bounds;
pub mod camera;
pub mod graph;
pub mod light;
pub mod node;
pub mod resolve;
pub mod scene;
pub mod script;
pub mod transform;

pub use bounds::{BoxShape, CollisionCallbacks, Shape, ShapeKind, Sphere};
pub use camera::{Camera, Projection};
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::Scene;
pub use script::Script;
pub use transform::Transform;
