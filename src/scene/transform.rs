use glam::{Mat4, Quat, Vec3};

/// Local transform of a node.
///
/// A node carries either an explicit matrix or a decomposed TRS triple, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Column-major 4x4 matrix
    Matrix(Mat4),
    Decomposed {
        translation: Vec3,
        /// Unit quaternion
        rotation: Quat,
        /// Non-uniform scale
        scale: Vec3,
    },
}

impl Transform {
    pub const IDENTITY: Self = Self::Decomposed {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::Decomposed {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// The local matrix (`T * R * S` for the decomposed form).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Transform::Matrix(matrix) => matrix,
            Transform::Decomposed {
                translation,
                rotation,
                scale,
            } => Mat4::from_scale_rotation_translation(scale, rotation, translation),
        }
    }

    /// `(scale, rotation, translation)`; a matrix with shear loses the shear.
    #[must_use]
    pub fn to_scale_rotation_translation(&self) -> (Vec3, Quat, Vec3) {
        match *self {
            Transform::Matrix(matrix) => matrix.to_scale_rotation_translation(),
            Transform::Decomposed {
                translation,
                rotation,
                scale,
            } => (scale, rotation, translation),
        }
    }

    #[must_use]
    pub fn translation(&self) -> Vec3 {
        match self {
            Transform::Matrix(matrix) => matrix.w_axis.truncate(),
            Transform::Decomposed { translation, .. } => *translation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self::Matrix(matrix)
    }
}
