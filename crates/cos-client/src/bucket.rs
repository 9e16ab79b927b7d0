//! Buckets and the resource paths beneath them

use crate::{client::Payload, CosClient, Dir, Result};
use cos_auth::AuthToken;
use serde::de::DeserializeOwned;

/// A bucket: the top-level container for one application's directories and files
#[derive(Clone, Debug)]
pub struct Bucket {
    client: CosClient,
    name: String,
}

impl Bucket {
    pub(crate) fn new(client: CosClient, name: String) -> Self {
        Self { client, name }
    }

    /// Bucket name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The client this bucket belongs to
    pub fn client(&self) -> &CosClient {
        &self.client
    }

    /// A handle to a directory; nested paths are allowed and `""` is the bucket root
    pub fn dir(&self, name: impl Into<String>) -> Dir {
        Dir::new(self.clone(), name.into())
    }

    /// The bucket root directory
    pub fn root(&self) -> Dir {
        self.dir("")
    }

    /// `/<app_id>/<bucket>/<path>` for an already escaped path
    pub fn resource_path(&self, path: &str) -> String {
        format!(
            "/{}/{}/{}",
            self.client.credentials().app_id(),
            self.name,
            path
        )
    }

    /// Full request URL for an already escaped path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.client.config().base_url(), self.resource_path(path))
    }

    /// Token for `path`: multi-use for `seconds` when positive, otherwise single-use
    pub fn sign(&self, path: &str, seconds: i64) -> Result<AuthToken> {
        self.client
            .sign(&self.name, &self.resource_path(path), seconds)
    }

    /// Token lasting the configured lifetime
    pub(crate) fn sign_multi(&self, path: &str) -> Result<AuthToken> {
        self.sign(path, self.client.config().sign_seconds)
    }

    /// Token bound to `path` alone
    pub(crate) fn sign_once(&self, path: &str) -> Result<AuthToken> {
        self.sign(path, 0)
    }

    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &AuthToken,
        payload: Payload,
    ) -> Result<T> {
        self.client
            .call(&self.resource_path(path), auth, payload)
            .await
    }

    pub(crate) async fn call_unit(&self, path: &str, auth: &AuthToken, payload: Payload) -> Result<()> {
        self.client
            .call_unit(&self.resource_path(path), auth, payload)
            .await
    }
}
