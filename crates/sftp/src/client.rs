//! SFTP client implementation
//!
//! Wraps russh and implements the Transport trait from sf-core.

use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{Config, Handle};
use russh_sftp::{client::SftpSession, protocol::OpenFlags};
use tokio::io::AsyncWriteExt as _;
use url::Url;

use sf_core::{Credentials, Error, FilePayload, Result, Session, Transport};

/// Host key verification policy.
#[derive(Debug, Clone, Default)]
pub enum HostCheck {
    /// Verify against `~/.ssh/known_hosts`.
    #[default]
    KnownHosts,
    /// Accept any host key. Only for explicitly trusted networks.
    AcceptAll,
}

/// SFTP transport backed by russh.
pub struct SftpTransport {
    config: Arc<Config>,
    host_check: HostCheck,
}

impl SftpTransport {
    pub fn new(host_check: HostCheck) -> Self {
        Self {
            config: Arc::new(Config::default()),
            host_check,
        }
    }
}

impl Default for SftpTransport {
    fn default() -> Self {
        Self::new(HostCheck::KnownHosts)
    }
}

#[async_trait]
impl Transport for SftpTransport {
    async fn connect(
        &self,
        host: &Url,
        port: u16,
        credentials: &Credentials,
    ) -> Result<Box<dyn Session>> {
        let hostname = host
            .host_str()
            .ok_or_else(|| Error::InvalidHost(host.to_string()))?;

        let handler = ClientHandler {
            hostname: hostname.to_owned(),
            port,
            host_check: self.host_check.clone(),
        };

        let mut handle = russh::client::connect(self.config.clone(), (hostname, port), handler)
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        authenticate(&mut handle, credentials).await?;

        tracing::debug!(host = hostname, port, "ssh session established");
        Ok(Box::new(RemoteSession { handle }))
    }
}

/// Performs password or public-key authentication on a fresh handle.
async fn authenticate(handle: &mut Handle<ClientHandler>, credentials: &Credentials) -> Result<()> {
    match credentials {
        Credentials::Password { user, password } => {
            let auth = handle
                .authenticate_password(user, password)
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            if !auth.success() {
                return Err(Error::Auth(format!("password rejected for user {user}")));
            }
        }
        Credentials::PrivateKey { user, key } => {
            // Key material is PEM text; russh wants it decoded up front.
            let pem = std::str::from_utf8(key)
                .map_err(|_| Error::Key("key bytes are not valid UTF-8".to_owned()))?;
            let secret_key = russh::keys::decode_secret_key(pem, None)
                .map_err(|e| Error::Key(e.to_string()))?;
            let hash = handle
                .best_supported_rsa_hash()
                .await
                .map_err(|e| Error::Network(e.to_string()))?
                .flatten();
            let auth = handle
                .authenticate_publickey(
                    user,
                    russh::keys::PrivateKeyWithHashAlg::new(Arc::new(secret_key), hash),
                )
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            if !auth.success() {
                return Err(Error::Auth(format!("private key rejected for user {user}")));
            }
        }
    }
    Ok(())
}

/// One authenticated SSH connection.
struct RemoteSession {
    handle: Handle<ClientHandler>,
}

#[async_trait]
impl Session for RemoteSession {
    async fn upload(&mut self, payload: &FilePayload, destination: &str) -> Result<()> {
        let channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let remote_path = remote_path(destination, &payload.name);
        tracing::debug!(path = %remote_path, bytes = payload.bytes.len(), "writing remote file");

        let mut file = sftp
            .open_with_flags(
                remote_path,
                OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
            )
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        file.write_all(&payload.bytes).await?;
        file.flush().await?;
        file.shutdown().await?;

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.handle
            .disconnect(russh::Disconnect::ByApplication, "", "")
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(())
    }
}

/// SSH client handler carrying the host key policy.
struct ClientHandler {
    hostname: String,
    port: u16,
    host_check: HostCheck,
}

// The handler's error type has to absorb russh's own errors.
#[derive(Debug, thiserror::Error)]
enum HandlerError {
    #[error(transparent)]
    Ssh(#[from] russh::Error),
    #[error(transparent)]
    Keys(#[from] russh::keys::Error),
}

impl russh::client::Handler for ClientHandler {
    type Error = HandlerError;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        match self.host_check {
            HostCheck::AcceptAll => Ok(true),
            HostCheck::KnownHosts => Ok(russh::keys::check_known_hosts(
                &self.hostname,
                self.port,
                server_public_key,
            )?),
        }
    }
}

/// Joins the destination folder and file name without doubling slashes.
fn remote_path(destination: &str, name: &str) -> String {
    format!("{}/{}", destination.trim_end_matches('/'), name)
}
