pub mod clip;
pub mod keyframes;

pub use clip::{Animation, AnimationSampler, AnimationTime, Channel, InterpolationMode, Target, TargetPath};
