//! Content sources for simple uploads

use bytes::Bytes;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

/// The content of a simple upload
///
/// Every variant is normalized to a byte buffer by [`UploadContent::into_bytes`]
/// before it is hashed and sent. A string is never taken as a file name
/// implicitly; wrap it in a [`PathBuf`] or convert it to bytes.
pub enum UploadContent {
    /// In-memory bytes
    Bytes(Bytes),
    /// A local file, read in full
    Path(PathBuf),
    /// Any async reader, drained to its end
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl UploadContent {
    /// Wrap a reader
    pub fn reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self::Reader(Box::new(reader))
    }

    /// Resolve the content to bytes
    pub async fn into_bytes(self) -> std::io::Result<Bytes> {
        match self {
            Self::Bytes(b) => Ok(b),
            Self::Path(path) => tokio::fs::read(path).await.map(Bytes::from),
            Self::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).await?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl fmt::Debug for UploadContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<Bytes> for UploadContent {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<u8>> for UploadContent {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for UploadContent {
    fn from(s: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(s))
    }
}

impl<const N: usize> From<&[u8; N]> for UploadContent {
    fn from(s: &[u8; N]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(s))
    }
}

impl From<PathBuf> for UploadContent {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for UploadContent {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}
