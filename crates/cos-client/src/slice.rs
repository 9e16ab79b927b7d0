//! Resumable slice upload for large files
//!
//! The upload opens with a negotiation call carrying the whole-file SHA-1 and
//! size. The server either recognizes the content and completes at once, or
//! answers with a session, the offset to resume from and possibly its own
//! slice size. Slices are then sent strictly one after another; each reply
//! must echo the session in flight, and the reply to the final slice carries
//! the public URL.

use crate::{
    config::DEFAULT_SLICE_SIZE,
    params::Params,
    types::{FirstSliceResult, SliceResult, UploadResult},
    ClientError, File, SliceUploadError,
};
use bytes::Bytes;
use cos_auth::{sha1_hex, ContentHasher};
use std::io::{self, SeekFrom};
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, instrument, warn};

/// Read buffer used while hashing the whole file
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(UploadProgress) + Send + Sync>;

/// Upload progress information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes the server holds so far, including any resumed prefix
    pub bytes_uploaded: u64,
    /// Total bytes to upload
    pub total_bytes: u64,
    /// Number of the slice just accepted, counted from 1 across the whole file
    pub current_slice: u64,
    /// Total number of slices
    pub total_slices: u64,
}

impl UploadProgress {
    /// Get percentage complete
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.bytes_uploaded as f64 / self.total_bytes as f64) * 100.0
    }
}

impl File {
    /// Upload a local file in slices, for larger files
    ///
    /// `slice_size` of 0 uses the configured default. Pass the session from a
    /// previous failed attempt to resume it. On failure the returned error
    /// carries the session to retry with, when one is still valid.
    pub async fn upload_slice(
        &self,
        local_file: impl AsRef<Path>,
        biz_attr: &str,
        slice_size: u64,
        session: Option<&str>,
    ) -> Result<UploadResult, SliceUploadError> {
        self.upload_slice_with_progress(local_file, biz_attr, slice_size, session, None)
            .await
    }

    /// [`File::upload_slice`] reporting progress after each accepted slice
    #[instrument(skip_all, fields(file = %self.full_name()))]
    pub async fn upload_slice_with_progress(
        &self,
        local_file: impl AsRef<Path>,
        biz_attr: &str,
        slice_size: u64,
        session: Option<&str>,
        progress: Option<ProgressCallback>,
    ) -> Result<UploadResult, SliceUploadError> {
        let path = self.checked_full_name().map_err(SliceUploadError::fatal)?;

        let mut file = fs::File::open(local_file.as_ref())
            .await
            .map_err(SliceUploadError::fatal)?;
        let size = file
            .metadata()
            .await
            .map_err(SliceUploadError::fatal)?
            .len();
        let sha = hash_file(&mut file).await.map_err(SliceUploadError::fatal)?;

        let mut slice_size = [slice_size, self.dir().bucket().client().config().slice_size]
            .into_iter()
            .find(|&s| s > 0)
            .unwrap_or(DEFAULT_SLICE_SIZE);
        let mut session = session.unwrap_or_default().to_string();

        let first: FirstSliceResult = self
            .upload_call(
                &path,
                Params::first_slice(biz_attr, slice_size, &session, sha, size),
                None,
            )
            .await
            .map_err(|e| SliceUploadError::resumable(e, &session))?;

        if first.slice.upload.is_complete() {
            debug!(size, "File already present on server");
            return Ok(first.slice.upload);
        }

        if !first.slice.session.is_empty() {
            session = first.slice.session;
        }
        if first.slice_size > 0 {
            slice_size = first.slice_size;
        }
        let mut offset = first.slice.offset;
        debug!(%session, offset, slice_size, size, "Slice upload negotiated");

        if offset > size {
            warn!(offset, size, "Negotiated offset past end of file");
            return Err(SliceUploadError::fatal(ClientError::OffsetOutOfRange {
                offset,
                size,
            }));
        }

        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(SliceUploadError::fatal)?;

        // No slice is ever longer than what is left of the file.
        let buf_len = usize::try_from(slice_size.min(size - offset)).map_err(|_| {
            SliceUploadError::fatal(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("slice size {slice_size} does not fit in memory"),
            ))
        })?;
        let mut buf = vec![0u8; buf_len];
        let total_slices = size.div_ceil(slice_size);

        while offset < size {
            let (n, eof) = read_slice(&mut file, &mut buf)
                .await
                .map_err(SliceUploadError::fatal)?;

            if n > 0 {
                let chunk = Bytes::copy_from_slice(&buf[..n]);
                let params = Params::slice(&session, sha1_hex(&chunk), offset);

                let part: SliceResult = self
                    .upload_call(&path, params, Some(chunk))
                    .await
                    .map_err(|e| SliceUploadError::resumable(e, &session))?;

                let accepted = offset + n as u64;
                let report = |bytes_uploaded: u64| {
                    if let Some(cb) = &progress {
                        cb(UploadProgress {
                            bytes_uploaded,
                            total_bytes: size,
                            current_slice: bytes_uploaded.div_ceil(slice_size),
                            total_slices,
                        });
                    }
                };

                if part.upload.is_complete() {
                    report(accepted);
                    debug!(offset = accepted, "Slice upload complete");
                    return Ok(part.upload);
                }

                if part.session != session {
                    warn!(expected = %session, actual = %part.session, "Session corrupt");
                    return Err(SliceUploadError::fatal(ClientError::SessionCorrupt {
                        expected: session,
                        actual: part.session,
                    }));
                }

                offset = accepted;
                report(offset);
                if part.offset != offset {
                    debug!(
                        offset,
                        server_offset = part.offset,
                        "Server reports a different offset"
                    );
                }
                debug!(offset, size, "Slice accepted");
            }

            if eof {
                break;
            }
        }

        warn!(offset, size, "All slices sent without completion");
        Err(SliceUploadError::resumable(
            ClientError::UnexpectedEof { offset, size },
            &session,
        ))
    }
}

/// Stream the rest of the file through SHA-1
async fn hash_file(file: &mut fs::File) -> io::Result<String> {
    let mut hasher = ContentHasher::new();
    let mut buf = vec![0u8; HASH_BUFFER_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize_hex())
}

/// Fill `buf` from the file; the flag is set when end of file was reached
async fn read_slice(file: &mut fs::File, buf: &mut [u8]) -> io::Result<(usize, bool)> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]).await? {
            0 => return Ok((filled, true)),
            n => filled += n,
        }
    }
    Ok((filled, false))
}
