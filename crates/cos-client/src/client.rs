//! Main client implementation

use crate::{params::Params, Bucket, ClientError, Config, Result};
use bytes::Bytes;
use cos_auth::{AuthToken, Credentials, NonceSource, RandomNonce};
use reqwest::{
    header,
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::{fmt, sync::Arc};
use tracing::debug;

/// Multipart field holding file content
const CONTENT_FIELD: &str = "filecontent";

/// COS storage client
///
/// Cheap to clone; every clone and every derived [`Bucket`], directory and
/// file handle shares the same credentials and connection pool.
#[derive(Clone)]
pub struct CosClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    credentials: Credentials,
    http: Client,
    nonce: Arc<dyn NonceSource>,
}

/// What a call sends, and how
pub(crate) enum Payload {
    /// GET, parameters in the query string
    Read(Params),
    /// POST, parameters as a JSON object
    Write(Params),
    /// POST, parameters as multipart fields plus optional file content
    Upload(Params, Option<Bytes>),
}

impl Payload {
    fn params(&self) -> &Params {
        match self {
            Self::Read(p) | Self::Write(p) | Self::Upload(p, _) => p,
        }
    }
}

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl Reply {
    /// Turn the envelope into its data payload, or the error it describes
    fn into_data(self, status: StatusCode) -> Result<Option<serde_json::Value>> {
        if self.code != 0 {
            return Err(ClientError::Api {
                code: self.code,
                message: self.message,
            });
        }
        if status != StatusCode::OK {
            return Err(ClientError::Api {
                code: i64::from(status.as_u16()),
                message: self.message,
            });
        }
        Ok(self.data)
    }
}

impl CosClient {
    /// Create a new client with the given credentials and configuration
    pub fn new(credentials: Credentials, config: Config) -> Result<Self> {
        Self::with_nonce_source(credentials, config, Arc::new(RandomNonce))
    }

    /// Create a client that draws signing nonces from `nonce`
    pub fn with_nonce_source(
        credentials: Credentials,
        config: Config,
        nonce: Arc<dyn NonceSource>,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::Config(format!("invalid user agent: {e}")))?,
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                credentials,
                http,
                nonce,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the credentials
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// A handle to the named bucket
    pub fn bucket(&self, name: impl Into<String>) -> Bucket {
        Bucket::new(self.clone(), name.into())
    }

    /// Sign for `bucket`: multi-use when `seconds > 0`, otherwise bound to `resource_path`
    pub(crate) fn sign(&self, bucket: &str, resource_path: &str, seconds: i64) -> Result<AuthToken> {
        let now = chrono::Utc::now().timestamp();
        let nonce = self.inner.nonce.next_nonce();
        let creds = &self.inner.credentials;

        let token = if seconds > 0 {
            creds.sign_multi(bucket, now, seconds, nonce)?
        } else {
            creds.sign_once(bucket, resource_path, now, nonce)?
        };
        Ok(token)
    }

    /// Make a signed call and decode the envelope's data into `T`
    ///
    /// An envelope without data is the "no data" error.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        resource_path: &str,
        auth: &AuthToken,
        payload: Payload,
    ) -> Result<T> {
        let data = self
            .send(resource_path, auth, payload)
            .await?
            .ok_or_else(ClientError::no_data)?;
        Ok(serde_json::from_value(data)?)
    }

    /// Make a signed call whose data, if any, is ignored
    pub(crate) async fn call_unit(
        &self,
        resource_path: &str,
        auth: &AuthToken,
        payload: Payload,
    ) -> Result<()> {
        self.send(resource_path, auth, payload).await?;
        Ok(())
    }

    async fn send(
        &self,
        resource_path: &str,
        auth: &AuthToken,
        payload: Payload,
    ) -> Result<Option<serde_json::Value>> {
        let url = format!("{}{}", self.inner.config.endpoint, resource_path);
        let op = payload.params().op;

        let req = match payload {
            Payload::Read(params) => self.inner.http.get(&url).query(&params.fields()),
            Payload::Write(params) => self.inner.http.post(&url).json(&params.to_json()),
            Payload::Upload(params, content) => self
                .inner
                .http
                .post(&url)
                .multipart(multipart_form(&params, content)?),
        };

        debug!(op, %url, "Sending request");
        let response = req
            .header(header::AUTHORIZATION, auth.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let reply: Reply = serde_json::from_slice(&body)?;
        debug!(op, %status, code = reply.code, "Received reply");

        reply.into_data(status)
    }
}

impl fmt::Debug for CosClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosClient")
            .field("config", &self.inner.config)
            .field("credentials", &self.inner.credentials)
            .finish_non_exhaustive()
    }
}

fn multipart_form(params: &Params, content: Option<Bytes>) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in params.fields() {
        form = form.text(key, value);
    }

    if let Some(content) = content {
        let part = Part::stream(content)
            .file_name("")
            .mime_str("application/octet-stream")?;
        form = form.part(CONTENT_FIELD, part);
    }

    Ok(form)
}
