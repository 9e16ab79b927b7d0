//! Error types for the cos-auth crate

use thiserror::Error;

/// Result type alias using `AuthError`
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while producing an authorization token
#[derive(Error, Debug)]
pub enum AuthError {
    /// The secret key was rejected by the MAC implementation
    #[error("invalid secret key: {0}")]
    InvalidKey(String),

    /// A multi-use token was requested with a non-positive lifetime
    #[error("invalid token lifetime: {0} seconds")]
    InvalidTtl(i64),
}
