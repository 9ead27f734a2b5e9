use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::errors::{GltfError, Result};

/// Byte source for documents and buffer files.
///
/// The asset graph never touches the file system directly; it asks its reader.
/// Tests substitute a counting or in-memory reader.
pub trait AssetReader {
    /// Reads a whole file (used for the JSON document).
    fn read_to_end(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Reads at most `byte_length` bytes from the start of a file.
    ///
    /// Returning fewer bytes is not an error at this level; the caller compares
    /// the result against the declared length.
    fn read_prefix(&self, path: &Path, byte_length: usize) -> std::io::Result<Vec<u8>> {
        let mut bytes = self.read_to_end(path)?;
        bytes.truncate(byte_length);
        Ok(bytes)
    }
}

/// Local file reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAssetReader;

impl AssetReader for FileAssetReader {
    fn read_to_end(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_prefix(&self, path: &Path, byte_length: usize) -> std::io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let mut bytes = Vec::with_capacity(byte_length);
        file.take(byte_length as u64).read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Where a buffer's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferSource {
    /// File path, already resolved against the document directory.
    File(PathBuf),
    /// Inline `data:` URI, kept verbatim until first read.
    DataUri(String),
    /// Bytes supplied directly (programmatic buffers, or no `uri` at all).
    Resident,
}

impl BufferSource {
    /// Classifies a raw `uri` field: `data:` URIs stay inline, anything else is a
    /// path relative to `base`.
    #[must_use]
    pub fn from_uri(uri: &str, base: &Path) -> Self {
        if is_data_uri(uri) {
            Self::DataUri(uri.to_string())
        } else {
            Self::File(base.join(uri))
        }
    }
}

#[inline]
#[must_use]
pub fn is_data_uri(uri: &str) -> bool {
    uri.starts_with("data:")
}

/// Decodes a `data:[<mime>][;base64],<payload>` URI.
///
/// Base64 is the only supported encoding; any other (including the implicit
/// percent-encoding of a header without `;base64`) is rejected.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| GltfError::DataUri("missing `data:` scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| GltfError::DataUri("missing `,` separator".to_string()))?;

    let encoding = header.rsplit_once(';').map(|(_, enc)| enc);
    match encoding {
        Some("base64") => Ok(base64::engine::general_purpose::STANDARD.decode(payload)?),
        Some(other) => Err(GltfError::UnsupportedEncoding(other.to_string())),
        None => Err(GltfError::UnsupportedEncoding(if header.is_empty() {
            "(none)".to_string()
        } else {
            header.to_string()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_data_uri() {
        let bytes = decode_data_uri("data:application/octet-stream;base64,AAECAw==").unwrap();
        assert_eq!(bytes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_decode_without_mime_type() {
        let bytes = decode_data_uri("data:;base64,/w==").unwrap();
        assert_eq!(bytes, vec![255]);
    }

    #[test]
    fn test_reject_other_encodings() {
        let err = decode_data_uri("data:text/plain;charset=utf-8,abc").unwrap_err();
        assert!(matches!(err, GltfError::UnsupportedEncoding(enc) if enc == "charset=utf-8"));

        let err = decode_data_uri("data:text/plain,abc").unwrap_err();
        assert!(matches!(err, GltfError::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_reject_malformed_uri() {
        assert!(matches!(decode_data_uri("data:base64"), Err(GltfError::DataUri(_))));
        assert!(matches!(decode_data_uri("data:;base64,@@@"), Err(GltfError::Base64(_))));
    }

    #[test]
    fn test_buffer_source_from_uri() {
        let base = Path::new("models");
        assert_eq!(
            BufferSource::from_uri("mesh.bin", base),
            BufferSource::File(PathBuf::from("models/mesh.bin"))
        );
        assert!(matches!(
            BufferSource::from_uri("data:;base64,AA==", base),
            BufferSource::DataUri(_)
        ));
    }
}
