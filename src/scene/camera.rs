/// Projection of a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Aspect ratio of the field of view; `None` lets the viewport decide
        aspect_ratio: Option<f32>,
        /// Vertical field of view in radians
        yfov: f32,
        /// `None` means an infinite projection
        zfar: Option<f32>,
        znear: f32,
    },
    Orthographic {
        xmag: f32,
        ymag: f32,
        zfar: f32,
        znear: f32,
    },
}

/// Camera referenced by a node; the node supplies the view transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: Option<String>,
    pub projection: Projection,
}
