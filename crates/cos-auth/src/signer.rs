//! Request signing
//!
//! A token is `base64(HMAC-SHA1(secret_key, payload) || payload)` where the
//! payload is the query-string shaped
//! `a=<app>&b=<bucket>&k=<secret_id>&e=<expires>&t=<issued>&r=<nonce>&f=<path>`.
//! The payload travels verbatim so the server can recompute the MAC.
//!
//! Two token kinds exist:
//! - multi-use: `e = t + ttl`, `f` empty
//! - single-use: `e = 0`, `f` is the exact resource path being authorized

use crate::{hashing::SHA1_BYTE_SIZE, AuthError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

/// Account credentials used to sign every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    secret_id: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials from the application id and the secret id/key pair
    pub fn new(
        app_id: impl Into<String>,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The application (account) id
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The public half of the secret pair
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Sign an explicit set of token fields
    ///
    /// Pure given its inputs: identical fields always yield identical tokens.
    pub fn sign(&self, fields: &SignFields<'_>) -> Result<AuthToken> {
        let payload = format!(
            "a={}&b={}&k={}&e={}&t={}&r={}&f={}",
            self.app_id,
            fields.bucket,
            self.secret_id,
            fields.expires_at,
            fields.issued_at,
            fields.nonce,
            fields.file_id,
        );

        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        mac.update(payload.as_bytes());

        let mut raw = mac.finalize().into_bytes().to_vec();
        raw.extend_from_slice(payload.as_bytes());

        Ok(AuthToken(STANDARD.encode(raw)))
    }

    /// Sign a token usable for any path in `bucket` until `issued_at + ttl_secs`
    pub fn sign_multi(
        &self,
        bucket: &str,
        issued_at: i64,
        ttl_secs: i64,
        nonce: u32,
    ) -> Result<AuthToken> {
        if ttl_secs <= 0 {
            return Err(AuthError::InvalidTtl(ttl_secs));
        }
        self.sign(&SignFields {
            bucket,
            expires_at: issued_at + ttl_secs,
            issued_at,
            nonce,
            file_id: "",
        })
    }

    /// Sign a token bound to exactly one resource path
    pub fn sign_once(
        &self,
        bucket: &str,
        resource_path: &str,
        issued_at: i64,
        nonce: u32,
    ) -> Result<AuthToken> {
        self.sign(&SignFields {
            bucket,
            expires_at: 0,
            issued_at,
            nonce,
            file_id: resource_path,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// The per-token fields that vary between calls
#[derive(Clone, Copy, Debug)]
pub struct SignFields<'a> {
    /// Bucket name (`b`)
    pub bucket: &'a str,
    /// Expiry as Unix seconds, 0 for single-use (`e`)
    pub expires_at: i64,
    /// Issue time as Unix seconds (`t`)
    pub issued_at: i64,
    /// Random nonce (`r`)
    pub nonce: u32,
    /// Resource path for single-use tokens, empty otherwise (`f`)
    pub file_id: &'a str,
}

/// An opaque authorization token, sent verbatim in the `Authorization` header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an already encoded token
    pub fn from_encoded(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The encoded token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the signed payload embedded after the MAC
    pub fn payload(&self) -> Option<String> {
        let raw = STANDARD.decode(&self.0).ok()?;
        if raw.len() < SHA1_BYTE_SIZE {
            return None;
        }
        String::from_utf8(raw[SHA1_BYTE_SIZE..].to_vec()).ok()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AuthToken> for String {
    fn from(token: AuthToken) -> Self {
        token.0
    }
}
