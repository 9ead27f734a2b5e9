//! Loader Settings
//!
//! ```rust,ignore
//! use gltf_graph::{Gltf, LoadSettings, SelfChildPolicy};
//!
//! // Default: reject malformed hierarchies, materialize buffers lazily
//! let gltf = Gltf::load("scene.gltf")?;
//!
//! // Tolerant loading with eager buffer reads
//! let settings = LoadSettings {
//!     self_child_policy: SelfChildPolicy::Drop,
//!     preload_buffers: true,
//! };
//! let gltf = Gltf::load_with("scene.gltf", &settings, FileAssetReader)?;
//! ```

/// What to do with a node that lists itself among its own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfChildPolicy {
    /// Fail loading with [`GltfError::InvalidHierarchy`](crate::GltfError::InvalidHierarchy).
    #[default]
    Reject,
    /// Drop the offending entry and log a warning.
    Drop,
}

/// Options controlling how a document becomes an asset graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadSettings {
    pub self_child_policy: SelfChildPolicy,

    /// Materialize every buffer before `load` returns, so I/O failures surface at
    /// load time instead of on first access.
    pub preload_buffers: bool,
}
