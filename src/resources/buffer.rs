use std::cell::OnceCell;
use std::path::PathBuf;

use crate::assets::io::{AssetReader, BufferSource, decode_data_uri};
use crate::errors::{GltfError, Result};
use crate::gltf::Gltf;

/// Raw binary blob referenced by buffer views.
///
/// Declared at parse time with no resident bytes. The bytes materialize on first read
/// (see [`Gltf::get_buffer`]) and stay cached for the buffer's lifetime. Buffers built
/// with [`Buffer::from_bytes`] are resident from the start.
#[derive(Debug)]
pub struct Buffer {
    /// Declared length in bytes
    pub byte_length: usize,
    pub source: BufferSource,
    pub name: Option<String>,
    data: OnceCell<Vec<u8>>,
}

impl Buffer {
    /// Declares a buffer whose bytes are loaded lazily from `source`.
    #[must_use]
    pub fn new(byte_length: usize, source: BufferSource) -> Self {
        Self {
            byte_length,
            source,
            name: None,
            data: OnceCell::new(),
        }
    }

    /// Creates a buffer that is already resident.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            byte_length: bytes.len(),
            source: BufferSource::Resident,
            name: None,
            data: OnceCell::from(bytes),
        }
    }

    /// Resident bytes, or `None` if the buffer has not been materialized yet.
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.data.get().map(Vec::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn is_resident(&self) -> bool {
        self.data.get().is_some()
    }

    /// Loads the bytes once and returns the cached copy on every later call.
    pub(crate) fn materialize(&self, reader: &dyn AssetReader) -> Result<&[u8]> {
        if let Some(bytes) = self.data.get() {
            return Ok(bytes.as_slice());
        }

        let bytes = match &self.source {
            BufferSource::DataUri(uri) => {
                let bytes = decode_data_uri(uri)?;
                if bytes.len() < self.byte_length {
                    return Err(GltfError::ShortRead {
                        uri: PathBuf::from("data:"),
                        expected: self.byte_length,
                        actual: bytes.len(),
                    });
                }
                if bytes.len() > self.byte_length {
                    log::warn!(
                        "Data URI decoded to {} bytes, {} declared",
                        bytes.len(),
                        self.byte_length
                    );
                }
                bytes
            }
            BufferSource::File(path) => {
                let bytes = reader.read_prefix(path, self.byte_length)?;
                if bytes.len() != self.byte_length {
                    return Err(GltfError::ShortRead {
                        uri: path.clone(),
                        expected: self.byte_length,
                        actual: bytes.len(),
                    });
                }
                bytes
            }
            BufferSource::Resident => return Err(GltfError::missing("buffer", "uri")),
        };

        log::debug!("Materialized buffer ({} bytes) from {:?}", bytes.len(), self.source);
        Ok(self.data.get_or_init(|| bytes).as_slice())
    }
}

/// Intended GPU binding of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferTarget {
    #[default]
    None,
    ArrayBuffer,
    ElementArrayBuffer,
}

impl TryFrom<u32> for BufferTarget {
    type Error = GltfError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            34962 => Ok(Self::ArrayBuffer),
            34963 => Ok(Self::ElementArrayBuffer),
            other => Err(GltfError::unknown("bufferView.target", other)),
        }
    }
}

/// Contiguous or strided sub-range of a [`Buffer`].
#[derive(Debug, Clone, Default)]
pub struct BufferView {
    /// Index of the buffer in [`Gltf::buffers`]
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    /// Distance between consecutive elements; `0` means tightly packed
    pub byte_stride: usize,
    pub target: BufferTarget,
    pub name: Option<String>,
}

impl BufferView {
    /// The backing buffer, materialized if needed.
    pub fn get_buffer<'a>(&self, gltf: &'a Gltf) -> Result<&'a Buffer> {
        gltf.get_buffer(self.buffer)
    }

    /// The bytes this view covers.
    pub fn get_data<'a>(&self, gltf: &'a Gltf) -> Result<&'a [u8]> {
        let bytes = gltf.buffer_data(self.buffer)?;
        let end = self
            .byte_offset
            .checked_add(self.byte_length)
            .ok_or_else(|| GltfError::overflowing_range(self.byte_offset, bytes.len()))?;
        bytes
            .get(self.byte_offset..end)
            .ok_or(GltfError::AccessorOutOfBounds {
                start: self.byte_offset,
                end,
                len: bytes.len(),
            })
    }
}
