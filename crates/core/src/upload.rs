//! Upload execution.
//!
//! Consumes a fully validated request. Transport faults never escape:
//! they are converted into the same error channel the validators use,
//! prefixed with the phase that failed.

use tracing::{debug, warn};

use crate::request::UploadRequest;
use crate::transport::Transport;
use crate::validated::{Errors, Validated};

/// Sends a validated request over the given transport.
///
/// The session is closed on every exit path, including a failed
/// transfer. A close failure after a successful upload is logged and
/// swallowed; the payload is already on the server.
pub async fn send_file<T>(transport: &T, request: &UploadRequest) -> Validated<()>
where
    T: Transport + ?Sized,
{
    debug!(
        host = %request.host,
        port = request.port,
        user = request.credentials.user(),
        "connecting"
    );

    let mut session = match transport
        .connect(&request.host, request.port, &request.credentials)
        .await
    {
        Ok(session) => session,
        Err(e) => return Err(Errors::one(format!("Connect failed: {e}"))),
    };

    let sent = session
        .upload(&request.payload, &request.destination)
        .await;
    let closed = session.close().await;

    if let Err(e) = sent {
        return Err(Errors::one(format!("Upload failed: {e}")));
    }
    if let Err(e) = closed {
        warn!("closing session after successful upload failed: {e}");
    }

    debug!(destination = %request.destination, "upload complete");
    Ok(())
}
