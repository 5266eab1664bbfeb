//! Credential resolution.
//!
//! A user name combines with either a password or a private key. The
//! password wins when both qualify; key bytes come from the first of
//! two channels that succeeds (inline base64, then a key file). When
//! nothing qualifies, the error keeps every path's messages so the
//! caller sees the whole diagnosis at once.

use std::fmt;
use std::path::PathBuf;

use crate::validate::{decode_base64, not_blank};
use crate::validated::{All as _, Errors, Validated, attempt_future, first_ok, validated};

/// Authentication material for one upload.
///
/// Constructed only through the validated factories, so a value always
/// carries a non-blank user name.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Password { user: String, password: String },
    PrivateKey { user: String, key: Vec<u8> },
}

impl Credentials {
    /// Password credentials. An empty password is accepted by
    /// contract; only an absent one fails.
    pub fn password(user: &str, password: Option<&str>) -> Validated<Self> {
        let user = validated(user, |u| not_blank(u, "user name"));
        let password = password.ok_or_else(|| Errors::one("No password given"));
        (user, password).all().map(|(user, password)| Self::Password {
            user: user.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Private-key credentials from already-loaded key bytes.
    pub fn private_key(user: &str, key: Vec<u8>) -> Validated<Self> {
        validated(user, |u| not_blank(u, "user name")).map(|user| Self::PrivateKey {
            user: user.to_owned(),
            key,
        })
    }

    pub fn user(&self) -> &str {
        match self {
            Self::Password { user, .. } | Self::PrivateKey { user, .. } => user,
        }
    }
}

// Secrets stay out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { user, .. } => f
                .debug_struct("Password")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            Self::PrivateKey { user, key } => f
                .debug_struct("PrivateKey")
                .field("user", user)
                .field("key_len", &key.len())
                .finish(),
        }
    }
}

/// Resolves credentials with password priority.
///
/// A qualifying password returns immediately and key material is never
/// touched, so no key file is read when it would be thrown away. The
/// private-key channels are then tried in declaration order: inline
/// base64 first, key file second.
pub async fn resolve(
    user: &str,
    password: Option<&str>,
    base64_key: Option<&str>,
    key_file: Option<&str>,
) -> Validated<Credentials> {
    let password_errors = match Credentials::password(user, password) {
        Ok(credentials) => return Ok(credentials),
        Err(errors) => errors,
    };

    let key = first_ok(
        [
            decode_base64(base64_key.unwrap_or_default(), "base64 private key"),
            read_key_file(key_file.unwrap_or_default()).await,
        ],
        || "No private key found".to_owned(),
    );

    match key.and_then(|key| Credentials::private_key(user, key)) {
        Ok(credentials) => Ok(credentials),
        Err(key_errors) => Err(Errors::one(
            "One of the following must be specified: password, base64 private key or private key file",
        )
        .merged(password_errors)
        .merged(key_errors)),
    }
}

/// Reads key bytes from a file path, expanding a leading `~`.
async fn read_key_file(path: &str) -> Validated<Vec<u8>> {
    let path = validated(path, |p| not_blank(p, "private key file path"))?;
    let path = expand_tilde(path);
    attempt_future(tokio::fs::read(&path), |e| {
        format!("Cannot load key from path <{}>: {e}", path.display())
    })
    .await
}

// `~/id_ed25519`-style paths are common enough in ssh setups to honor.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
