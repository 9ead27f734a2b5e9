use std::str::FromStr;

use crate::assets::Handle;
use crate::errors::{GltfError, Result};
use crate::scene::node::Node;

/// Node property an animation channel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    /// Morph target weights
    Weights,
}

impl FromStr for TargetPath {
    type Err = GltfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "translation" => Ok(Self::Translation),
            "rotation" => Ok(Self::Rotation),
            "scale" => Ok(Self::Scale),
            "weights" => Ok(Self::Weights),
            other => Err(GltfError::unknown("channel.target.path", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

impl FromStr for InterpolationMode {
    type Err = GltfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LINEAR" => Ok(Self::Linear),
            "STEP" => Ok(Self::Step),
            "CUBICSPLINE" => Ok(Self::CubicSpline),
            other => Err(GltfError::unknown("sampler.interpolation", other)),
        }
    }
}

/// What a channel animates.
#[derive(Debug, Clone)]
pub struct Target {
    /// Position of the target node in the node table
    pub node_index: Option<usize>,
    pub(crate) node: Option<Handle<Node>>,
    pub path: TargetPath,
}

impl Target {
    /// Live target node, filled in by the resolution pass.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<Handle<Node>> {
        self.node
    }
}

#[derive(Debug, Clone)]
pub struct Channel {
    /// Index into [`Animation::samplers`]
    pub sampler: usize,
    pub target: Target,
}

/// Keyframe input/output pair; both are accessor indices.
#[derive(Debug, Clone)]
pub struct AnimationSampler {
    /// Accessor holding keyframe times
    pub input: usize,
    /// Accessor holding keyframe values
    pub output: usize,
    pub interpolation: InterpolationMode,
}

/// Playback position of an animation, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationTime {
    pub current: f32,
    pub max: f32,
}

#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub channels: Vec<Channel>,
    pub samplers: Vec<AnimationSampler>,
    pub time: AnimationTime,
}

impl Animation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: Vec::new(),
            samplers: Vec::new(),
            time: AnimationTime::default(),
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new("Unknown")
    }
}
