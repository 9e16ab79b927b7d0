//! # COS Auth
//!
//! Signing and hashing primitives for the COS object storage service.
//!
//! This crate provides:
//! - **Signer**: HMAC-SHA1 authorization tokens, multi-use or single-use
//! - **Nonce sources**: injectable, thread-safe nonce generation
//! - **Content hashing**: uppercase hex SHA-1 for files and slices
//!
//! Nothing here touches the network or the filesystem.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cos_auth::Credentials;
//!
//! let creds = Credentials::new("200001", "AKID...", "secret");
//!
//! // Valid for any path in the bucket for 60 seconds
//! let token = creds.sign_multi("newbucket", now, 60, nonce)?;
//!
//! // Valid for exactly one resource path
//! let token = creds.sign_once("newbucket", "/200001/newbucket/a.jpg", now, nonce)?;
//! ```

pub mod error;
pub mod hashing;
pub mod nonce;
pub mod signer;

pub use error::{AuthError, Result};
pub use hashing::{sha1_hex, ContentHasher};
pub use nonce::{FixedNonce, NonceSource, RandomNonce};
pub use signer::{AuthToken, Credentials, SignFields};
