use glam::Vec3;

/// Kind of punctual light and its kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point,
    Directional,
    /// Cone along the local -Z axis
    Spot {
        /// Angle in radians from the center where falloff begins
        inner_cone_angle: f32,
        /// Angle in radians from the center where falloff ends
        outer_cone_angle: f32,
    },
}

impl LightKind {
    pub const DEFAULT_OUTER_CONE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
}

/// Punctual light attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub color: Vec3,
    /// Candela for point and spot lights, lux for directional lights
    pub intensity: f32,
    /// Distance cutoff; `None` is infinite
    pub range: Option<f32>,
    pub kind: LightKind,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            color: Vec3::ONE,
            intensity: 1.0,
            range: None,
            kind: LightKind::Point,
        }
    }
}
