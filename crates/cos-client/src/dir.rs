//! Directory operations

use crate::{
    client::Payload,
    params::Params,
    path::{escape_dir, escape_path},
    types::*,
    Bucket, File, Result,
};
use cos_auth::AuthToken;
use tracing::instrument;

/// A directory inside a bucket
#[derive(Clone, Debug)]
pub struct Dir {
    bucket: Bucket,
    name: String,
}

impl Dir {
    pub(crate) fn new(bucket: Bucket, name: String) -> Self {
        Self { bucket, name }
    }

    /// A handle to a file in this directory; the name must not be empty
    pub fn file(&self, name: impl Into<String>) -> File {
        File::new(self.clone(), name.into())
    }

    /// The bucket this directory lives in
    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    /// Escaped name; empty for the root, otherwise ending in exactly one `/`
    pub fn name(&self) -> String {
        escape_dir(&self.name)
    }

    /// The unescaped name this handle was created with
    pub fn raw_name(&self) -> &str {
        &self.name
    }

    /// Token for this directory: multi-use when `seconds > 0`, otherwise single-use
    pub fn sign(&self, seconds: i64) -> Result<AuthToken> {
        self.bucket.sign(&self.name(), seconds)
    }

    /// Create the directory with the given attribute
    #[instrument(skip(self), fields(dir = %self.name()))]
    pub async fn create(&self, biz_attr: &str) -> Result<CreateDirResult> {
        let path = self.name();
        let auth = self.bucket.sign_multi(&path)?;
        self.bucket
            .call(&path, &auth, Payload::Write(Params::create(biz_attr)))
            .await
    }

    /// Replace the directory attribute
    #[instrument(skip(self), fields(dir = %self.name()))]
    pub async fn update(&self, biz_attr: &str) -> Result<()> {
        let path = self.name();
        let auth = self.bucket.sign_once(&path)?;
        self.bucket
            .call_unit(&path, &auth, Payload::Write(Params::update(biz_attr)))
            .await
    }

    /// Query directory information
    #[instrument(skip(self), fields(dir = %self.name()))]
    pub async fn stat(&self) -> Result<PathInfo> {
        let path = self.name();
        let auth = self.bucket.sign_multi(&path)?;
        self.bucket
            .call(&path, &auth, Payload::Read(Params::stat()))
            .await
    }

    /// Delete the directory
    #[instrument(skip(self), fields(dir = %self.name()))]
    pub async fn delete(&self) -> Result<()> {
        let path = self.name();
        let auth = self.bucket.sign_once(&path)?;
        self.bucket
            .call_unit(&path, &auth, Payload::Write(Params::delete()))
            .await
    }

    /// List the directory; `None` uses [`ListDirParams::default`]
    pub async fn list(&self, params: Option<ListDirParams>) -> Result<ListDirResult> {
        self.prefix_search("", params).await
    }

    /// List entries of this directory whose names start with `prefix`
    #[instrument(skip(self), fields(dir = %self.name()))]
    pub async fn prefix_search(
        &self,
        prefix: &str,
        params: Option<ListDirParams>,
    ) -> Result<ListDirResult> {
        let params = params.unwrap_or_default();
        let dir = self.name();
        // The token covers the directory; the prefix only extends the URL.
        let auth = self.bucket.sign_multi(&dir)?;
        let path = dir + &escape_path(prefix);
        self.bucket
            .call(&path, &auth, Payload::Read(Params::list(&params)))
            .await
    }
}
