use std::fmt;
use std::str::FromStr;

use crate::errors::{GltfError, Result};
use crate::gltf::Gltf;
use crate::resources::buffer::BufferView;

/// Datatype of each component of an accessor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentType {
    /// Size in bytes of one component.
    #[inline]
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }

    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            ComponentType::I8 => 5120,
            ComponentType::U8 => 5121,
            ComponentType::I16 => 5122,
            ComponentType::U16 => 5123,
            ComponentType::U32 => 5125,
            ComponentType::F32 => 5126,
        }
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = GltfError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            5120 => Ok(ComponentType::I8),
            5121 => Ok(ComponentType::U8),
            5122 => Ok(ComponentType::I16),
            5123 => Ok(ComponentType::U16),
            5125 => Ok(ComponentType::U32),
            5126 => Ok(ComponentType::F32),
            other => Err(GltfError::unknown("accessor.componentType", other)),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::I8 => "BYTE",
            ComponentType::U8 => "UNSIGNED_BYTE",
            ComponentType::I16 => "SHORT",
            ComponentType::U16 => "UNSIGNED_SHORT",
            ComponentType::U32 => "UNSIGNED_INT",
            ComponentType::F32 => "FLOAT",
        };
        f.write_str(name)
    }
}

/// Shape of an accessor element: scalar, vector or matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensions {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl Dimensions {
    /// Number of components per element.
    #[inline]
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Dimensions::Scalar => 1,
            Dimensions::Vec2 => 2,
            Dimensions::Vec3 => 3,
            Dimensions::Vec4 | Dimensions::Mat2 => 4,
            Dimensions::Mat3 => 9,
            Dimensions::Mat4 => 16,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Dimensions::Scalar => "SCALAR",
            Dimensions::Vec2 => "VEC2",
            Dimensions::Vec3 => "VEC3",
            Dimensions::Vec4 => "VEC4",
            Dimensions::Mat2 => "MAT2",
            Dimensions::Mat3 => "MAT3",
            Dimensions::Mat4 => "MAT4",
        }
    }
}

impl FromStr for Dimensions {
    type Err = GltfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SCALAR" => Ok(Dimensions::Scalar),
            "VEC2" => Ok(Dimensions::Vec2),
            "VEC3" => Ok(Dimensions::Vec3),
            "VEC4" => Ok(Dimensions::Vec4),
            "MAT2" => Ok(Dimensions::Mat2),
            "MAT3" => Ok(Dimensions::Mat3),
            "MAT4" => Ok(Dimensions::Mat4),
            other => Err(GltfError::unknown("accessor.type", other)),
        }
    }
}

/// Bytes from the first byte of element `0` to the last byte of element `count - 1`,
/// or `None` if that does not fit in `usize`.
pub(crate) fn strided_span(count: usize, stride: usize, element_size: usize) -> Option<usize> {
    match count {
        0 => Some(0),
        n => (n - 1).checked_mul(stride)?.checked_add(element_size),
    }
}

/// Typed, shaped, strided view over a [`BufferView`].
///
/// An accessor never owns bytes and never converts them: it only computes where
/// element `i` lives. Decoding is left to the caller, who knows the declared
/// component type and dimensions.
#[derive(Debug, Clone)]
pub struct Accessor {
    /// Index into [`Gltf::buffer_views`]
    pub buffer_view: Option<usize>,
    /// Offset relative to the start of the buffer view
    pub byte_offset: usize,
    pub component_type: ComponentType,
    pub count: usize,
    pub dimensions: Dimensions,
    pub min: Vec<f32>,
    pub max: Vec<f32>,
    pub name: Option<String>,
}

impl Accessor {
    #[must_use]
    pub fn new(
        buffer_view: usize,
        component_type: ComponentType,
        dimensions: Dimensions,
        count: usize,
    ) -> Self {
        Self {
            buffer_view: Some(buffer_view),
            byte_offset: 0,
            component_type,
            count,
            dimensions,
            min: Vec::new(),
            max: Vec::new(),
            name: None,
        }
    }

    /// Size of one element in bytes.
    #[inline]
    #[must_use]
    pub fn element_size(&self) -> usize {
        self.component_type.size() * self.dimensions.arity()
    }

    /// Total size of the data pointed by this accessor, ignoring stride padding.
    #[inline]
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.element_size() * self.count
    }

    /// The buffer view this accessor reads from.
    ///
    /// # Panics
    /// If the view index is out of range; indices are validated at load time.
    #[must_use]
    pub fn get_buffer_view<'a>(&self, gltf: &'a Gltf) -> Option<&'a BufferView> {
        self.buffer_view.map(|index| gltf.buffer_view(index))
    }

    /// Distance in bytes between consecutive elements.
    #[must_use]
    pub fn get_stride(&self, gltf: &Gltf) -> usize {
        match self.get_buffer_view(gltf) {
            Some(view) if view.byte_stride != 0 => view.byte_stride,
            _ => self.element_size(),
        }
    }

    /// Byte range of the accessor's elements within its buffer, as
    /// `(buffer index, start, end)`.
    fn byte_range(&self, gltf: &Gltf) -> Result<(usize, usize, usize)> {
        let view = self
            .get_buffer_view(gltf)
            .ok_or(GltfError::MissingBufferView)?;
        let start = view.byte_offset.saturating_add(self.byte_offset);
        let end = view
            .byte_offset
            .checked_add(self.byte_offset)
            .and_then(|start| start.checked_add(strided_span(self.count, self.get_stride(gltf), self.element_size())?))
            .ok_or_else(|| GltfError::overflowing_range(start, gltf.buffers[view.buffer].byte_length))?;
        Ok((view.buffer, start, end))
    }

    /// Bytes from the first byte of element `0` to the last byte of element
    /// `count - 1`, materializing the buffer if needed.
    ///
    /// Element `i` starts at `get_stride() * i` within the returned slice.
    pub fn get_data<'a>(&self, gltf: &'a Gltf) -> Result<&'a [u8]> {
        let (buffer, start, end) = self.byte_range(gltf)?;
        let bytes = gltf.buffer_data(buffer)?;
        bytes
            .get(start..end)
            .ok_or(GltfError::AccessorOutOfBounds {
                start,
                end,
                len: bytes.len(),
            })
    }

    /// Raw bytes of element `index`.
    ///
    /// # Panics
    /// If `index >= count`.
    pub fn element<'a>(&self, gltf: &'a Gltf, index: usize) -> Result<&'a [u8]> {
        assert!(
            index < self.count,
            "element {index} out of range for accessor of {} elements",
            self.count
        );
        let data = self.get_data(gltf)?;
        let offset = index * self.get_stride(gltf);
        Ok(&data[offset..offset + self.element_size()])
    }

    /// Fails with [`GltfError::AccessorMismatch`] unless the accessor has exactly
    /// this component type and shape.
    pub fn expect_layout(&self, component_type: ComponentType, dimensions: Dimensions) -> Result<()> {
        if self.component_type == component_type && self.dimensions == dimensions {
            Ok(())
        } else {
            Err(GltfError::AccessorMismatch {
                expected: format!("{component_type} {}", dimensions.as_str()),
                found: format!("{} {}", self.component_type, self.dimensions.as_str()),
            })
        }
    }
}
