//! File operations

use crate::{
    client::Payload,
    params::Params,
    path::escape_path,
    types::*,
    Bucket, ClientError, Dir, Result, UploadContent,
};
use cos_auth::{sha1_hex, AuthToken};
use tracing::{debug, instrument};

/// A file inside a directory
#[derive(Clone, Debug)]
pub struct File {
    dir: Dir,
    name: String,
}

impl File {
    pub(crate) fn new(dir: Dir, name: String) -> Self {
        Self { dir, name }
    }

    /// The directory holding this file
    pub fn dir(&self) -> &Dir {
        &self.dir
    }

    pub fn bucket(&self) -> &Bucket {
        self.dir.bucket()
    }

    /// Escaped file name without leading or trailing `/`
    pub fn name(&self) -> String {
        escape_path(&self.name)
    }

    /// Escaped directory name followed by the escaped file name
    pub fn full_name(&self) -> String {
        self.dir.name() + &self.name()
    }

    /// Token for this file: multi-use when `seconds > 0`, otherwise single-use
    pub fn sign(&self, seconds: i64) -> Result<AuthToken> {
        self.dir.bucket().sign(&self.full_name(), seconds)
    }

    /// The full name, refusing a file handle with no name of its own
    pub(crate) fn checked_full_name(&self) -> Result<String> {
        if self.name().is_empty() {
            return Err(ClientError::InvalidName(self.name.clone()));
        }
        Ok(self.full_name())
    }

    /// Upload content in a single request, for smaller files
    #[instrument(skip(self, content), fields(file = %self.full_name()))]
    pub async fn upload(
        &self,
        content: impl Into<UploadContent>,
        biz_attr: &str,
    ) -> Result<UploadResult> {
        let path = self.checked_full_name()?;
        let data = content.into().into_bytes().await?;
        let sha = sha1_hex(&data);
        debug!(bytes = data.len(), %sha, "Uploading file");

        self.upload_call(&path, Params::upload(biz_attr, sha), Some(data))
            .await
    }

    /// Replace the file attribute
    #[instrument(skip(self), fields(file = %self.full_name()))]
    pub async fn update(&self, biz_attr: &str) -> Result<()> {
        let path = self.checked_full_name()?;
        let auth = self.dir.bucket().sign_once(&path)?;
        self.dir
            .bucket()
            .call_unit(&path, &auth, Payload::Write(Params::update(biz_attr)))
            .await
    }

    /// Query file information
    #[instrument(skip(self), fields(file = %self.full_name()))]
    pub async fn stat(&self) -> Result<PathInfo> {
        let path = self.checked_full_name()?;
        let auth = self.dir.bucket().sign_multi(&path)?;
        self.dir
            .bucket()
            .call(&path, &auth, Payload::Read(Params::stat()))
            .await
    }

    /// Delete the file
    #[instrument(skip(self), fields(file = %self.full_name()))]
    pub async fn delete(&self) -> Result<()> {
        let path = self.checked_full_name()?;
        let auth = self.dir.bucket().sign_once(&path)?;
        self.dir
            .bucket()
            .call_unit(&path, &auth, Payload::Write(Params::delete()))
            .await
    }

    /// A multipart upload call, signed afresh each time
    pub(crate) async fn upload_call<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        content: Option<bytes::Bytes>,
    ) -> Result<T> {
        let auth = self.dir.bucket().sign_multi(path)?;
        self.dir
            .bucket()
            .call(path, &auth, Payload::Upload(params, content))
            .await
    }
}
