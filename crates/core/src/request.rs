//! Upload request assembly.
//!
//! Five inputs validate independently — host, port, credentials,
//! payload, destination — and the request exists only when every one
//! of them passed. A failed assembly reports every field's problems in
//! one pass instead of stopping at the first.

use std::path::Path;

use url::Url;

use crate::credentials::{self, Credentials};
use crate::validate::{absolute_on_server, greater_than_zero, host_uri, not_blank};
use crate::validated::{All as _, Errors, Validated, attempt, attempt_future, validated};

/// Raw, unvalidated inputs as they arrive from the command line.
#[derive(Debug, Clone)]
pub struct UploadInput {
    pub file: String,
    pub target_folder: String,
    pub host: String,
    pub port: i32,
    pub user: String,
    pub password: Option<String>,
    pub base64_key: Option<String>,
    pub key_file: Option<String>,
}

/// A local file's name and contents, ready to be written remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A fully validated upload.
///
/// Every field passed its checks; the value is built right before the
/// network call and never stored anywhere.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub host: Url,
    pub port: u16,
    pub credentials: Credentials,
    pub payload: FilePayload,
    pub destination: String,
}

/// Validates all five fields independently, in declaration order, and
/// combines them. The error side carries the union of every field's
/// messages.
pub async fn assemble(input: &UploadInput) -> Validated<UploadRequest> {
    let host = host_uri(&input.host);
    let port = checked_port(input.port);
    let credentials = credentials::resolve(
        &input.user,
        input.password.as_deref(),
        input.base64_key.as_deref(),
        input.key_file.as_deref(),
    )
    .await;
    let payload = read_payload(&input.file).await;
    let destination = validated(input.target_folder.clone(), |folder| {
        let missing = not_blank(folder, "target folder");
        if missing.is_empty() {
            absolute_on_server(folder, "Target folder")
        } else {
            missing
        }
    });

    (host, port, credentials, payload, destination).all().map(
        |(host, port, credentials, payload, destination)| UploadRequest {
            host,
            port,
            credentials,
            payload,
            destination,
        },
    )
}

/// A port is valid when strictly positive and representable on the
/// wire.
fn checked_port(value: i32) -> Validated<u16> {
    validated(value, |v| greater_than_zero(*v)).and_then(|v| {
        attempt(
            || u16::try_from(v),
            |_| format!("Invalid port {v}: port has to be at most 65535"),
        )
    })
}

/// Reads the file to send. A blank path is a validation problem of its
/// own, not deferred to the read; only an actual read goes through the
/// fault boundary.
async fn read_payload(path: &str) -> Validated<FilePayload> {
    let path = validated(path, |p| not_blank(p, "upload file path"))?;
    let name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Errors::one(format!("Upload file path <{path}> has no file name")))?;
    let bytes = attempt_future(tokio::fs::read(path), |e| {
        format!("Failed to read upload file <{path}>: {e}")
    })
    .await?;
    Ok(FilePayload {
        name: name.to_owned(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn input() -> UploadInput {
        UploadInput {
            file: String::new(),
            target_folder: "/incoming".to_owned(),
            host: "https://example.com".to_owned(),
            port: 21,
            user: "alice".to_owned(),
            password: Some("secret".to_owned()),
            base64_key: None,
            key_file: None,
        }
    }

    #[tokio::test]
    async fn assembles_when_every_field_is_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"payload bytes").unwrap();

        let request = assemble(&UploadInput {
            file: file.path().to_str().unwrap().to_owned(),
            ..input()
        })
        .await
        .unwrap();

        assert_eq!(request.host.as_str(), "https://example.com/");
        assert_eq!(request.port, 21);
        assert!(matches!(request.credentials, Credentials::Password { .. }));
        assert_eq!(request.payload.bytes, b"payload bytes");
        assert_eq!(request.destination, "/incoming");
    }

    #[tokio::test]
    async fn payload_keeps_the_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, b"x").unwrap();

        let request = assemble(&UploadInput {
            file: path.to_str().unwrap().to_owned(),
            ..input()
        })
        .await
        .unwrap();
        assert_eq!(request.payload.name, "report.txt");
    }

    #[tokio::test]
    async fn every_bad_field_is_reported_together() {
        let errors = assemble(&UploadInput {
            file: String::new(),
            target_folder: "relative/path".to_owned(),
            host: String::new(),
            port: -1,
            user: "   ".to_owned(),
            password: None,
            base64_key: None,
            key_file: None,
        })
        .await
        .unwrap_err();

        let all = errors.to_string();
        assert!(all.contains("Invalid host address <>"));
        assert!(all.contains("Invalid port -1: port has to be greater than zero"));
        assert!(all.contains("No user name specified"));
        assert!(all.contains("No upload file path specified"));
        assert!(all.contains("Target folder has to be an absolute path on the server"));
        assert!(errors.len() >= 5);
    }

    #[tokio::test]
    async fn blank_file_path_is_a_validation_failure() {
        let errors = assemble(&input()).await.unwrap_err();
        assert_eq!(errors.messages(), ["No upload file path specified"]);
    }

    #[tokio::test]
    async fn unreadable_file_reports_path_and_cause() {
        let errors = assemble(&UploadInput {
            file: "/no/such/file.bin".to_owned(),
            ..input()
        })
        .await
        .unwrap_err();
        assert!(
            errors
                .iter()
                .any(|m| m.starts_with("Failed to read upload file </no/such/file.bin>:"))
        );
    }

    #[tokio::test]
    async fn oversized_port_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"x").unwrap();

        let errors = assemble(&UploadInput {
            file: file.path().to_str().unwrap().to_owned(),
            port: 70_000,
            ..input()
        })
        .await
        .unwrap_err();
        assert_eq!(
            errors.messages(),
            ["Invalid port 70000: port has to be at most 65535"]
        );
    }

    #[tokio::test]
    async fn blank_destination_is_reported_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"x").unwrap();

        let errors = assemble(&UploadInput {
            file: file.path().to_str().unwrap().to_owned(),
            target_folder: "  ".to_owned(),
            ..input()
        })
        .await
        .unwrap_err();
        assert_eq!(errors.messages(), ["No target folder specified"]);
    }
}
