//! # COS Client SDK
//!
//! A client SDK for the COS object storage service.
//!
//! ## Features
//!
//! - **Signed requests**: HMAC-SHA1 tokens, multi-use or bound to a single path
//! - **Directories**: create, update, stat, delete, list and prefix search
//! - **Files**: simple upload, update, stat and delete
//! - **Resumable upload**: slice upload with session continuation and
//!   server-side deduplication by content hash
//!
//! ## Example
//!
//! ```rust,ignore
//! use cos_client::{Config, CosClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CosClient::new(
//!         Credentials::new("200001", "your-secret-id", "your-secret-key"),
//!         Config::default(),
//!     )?;
//!
//!     let dir = client.bucket("newbucket").dir("photos");
//!     dir.create("").await?;
//!
//!     // Small files go up in one request
//!     dir.file("hello.txt").upload(b"Hello, World!", "").await?;
//!
//!     // Large files go up in slices and can be resumed
//!     match dir.file("big.bin").upload_slice("big.bin", "", 0, None).await {
//!         Ok(result) => println!("Uploaded to {}", result.url),
//!         Err(e) => println!("Failed ({}), resume with {:?}", e, e.resume_session()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod bucket;
mod client;
mod config;
mod content;
mod dir;
mod error;
mod file;
mod params;
mod path;
mod slice;
mod types;

pub use bucket::Bucket;
pub use client::CosClient;
pub use config::{Config, DEFAULT_ENDPOINT, DEFAULT_SIGN_SECONDS, DEFAULT_SLICE_SIZE};
pub use content::UploadContent;
pub use dir::Dir;
pub use error::{ClientError, Result, SliceUploadError, NO_DATA_CODE};
pub use file::File;
pub use path::{escape_dir, escape_path};
pub use slice::{ProgressCallback, UploadProgress};
pub use types::*;

// Re-export what callers need to build a client
pub use cos_auth::{AuthToken, Credentials, FixedNonce, NonceSource, RandomNonce};
