//! Infrastructure errors for the transport seam.
//!
//! Validation problems use [`crate::validated::Errors`]; the variants
//! here describe faults from the transport and its adapter, and cross
//! into the validation channel only at the executor boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The host URI has no usable host component.
    #[error("invalid host address: {0}")]
    InvalidHost(String),

    /// The server rejected the credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The private key could not be used.
    #[error("invalid private key: {0}")]
    Key(String),

    /// Connection-level failures.
    #[error("network error: {0}")]
    Network(String),

    /// Local I/O failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
