//! sf-core: validation and upload pipeline for the sf CLI
//!
//! This crate provides the core functionality for the sf CLI:
//! - A result type that accumulates every validation error
//! - Field validators for the upload inputs
//! - Credential resolution with password/private-key priority
//! - Upload request assembly
//! - The transport seam and the upload executor
//!
//! The crate is independent of any SSH implementation: the network
//! side lives behind the `Transport` trait, so the whole pipeline
//! tests against mocks.

pub mod credentials;
pub mod error;
pub mod request;
pub mod transport;
pub mod upload;
pub mod validate;
pub mod validated;

pub use credentials::Credentials;
pub use error::{Error, Result};
pub use request::{FilePayload, UploadInput, UploadRequest, assemble};
pub use transport::{Session, Transport};
pub use upload::send_file;
pub use validated::{All, Errors, Validated, ValidatedExt, attempt, attempt_future, first_ok, validated};
