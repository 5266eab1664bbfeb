//! The transport seam.
//!
//! The core knows nothing about the wire protocol; it hands a
//! validated request to whatever implements [`Transport`] and expects
//! the session to be released on every exit path. Keeping the traits
//! here lets the pipeline and executor test against mocks instead of a
//! live server.

use async_trait::async_trait;
use url::Url;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::request::FilePayload;

/// Opens authenticated sessions against a remote server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connects and authenticates. A failed connection is an error,
    /// never a half-open session.
    async fn connect(
        &self,
        host: &Url,
        port: u16,
        credentials: &Credentials,
    ) -> Result<Box<dyn Session>>;
}

/// One open connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Session: Send {
    /// Writes the payload as `destination/{payload.name}`.
    async fn upload(&mut self, payload: &FilePayload, destination: &str) -> Result<()>;

    /// Releases the session.
    async fn close(&mut self) -> Result<()>;
}
