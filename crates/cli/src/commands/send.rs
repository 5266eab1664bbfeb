//! send command - validate inputs and upload the file
//!
//! Every input problem is reported before any network work starts, so
//! the user fixes all of them in one pass.

use std::time::Duration;

use humansize::{BINARY, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use sf_core::{Errors, UploadInput, UploadRequest, assemble, send_file};
use sf_sftp::{HostCheck, SftpTransport};

use crate::cli::Cli;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// JSON output for a completed upload
#[derive(Debug, Serialize)]
struct SendOutput {
    success: bool,
    host: String,
    destination: String,
    file: String,
    size_bytes: usize,
    message: String,
}

/// Execute the send command
pub async fn execute(args: Cli, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let host_check = if args.insecure {
        HostCheck::AcceptAll
    } else {
        HostCheck::KnownHosts
    };

    let input = UploadInput {
        file: args.file,
        target_folder: args.target_folder,
        host: args.host,
        port: args.port,
        user: args.user,
        password: args.password,
        base64_key: args.base64_key,
        key_file: args.key_file,
    };

    let request = match assemble(&input).await {
        Ok(request) => request,
        Err(errors) => return report_failure(&formatter, &errors),
    };

    let spinner = upload_spinner(&formatter, &request);
    let transport = SftpTransport::new(host_check);
    let outcome = send_file(&transport, &request).await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&SendOutput {
                    success: true,
                    host: request.host.to_string(),
                    destination: request.destination.clone(),
                    file: request.payload.name.clone(),
                    size_bytes: request.payload.bytes.len(),
                    message: "File uploaded successfully".to_owned(),
                });
            } else {
                formatter.success("File uploaded successfully");
            }
            ExitCode::Success
        }
        Err(errors) => report_failure(&formatter, &errors),
    }
}

/// One error line per problem for humans, one joined object for JSON.
fn report_failure(formatter: &Formatter, errors: &Errors) -> ExitCode {
    if formatter.is_json() {
        formatter.error(&errors.to_string());
    } else {
        for message in errors.iter() {
            formatter.error(message);
        }
    }
    ExitCode::Failure
}

fn upload_spinner(formatter: &Formatter, request: &UploadRequest) -> Option<ProgressBar> {
    if formatter.is_json() || formatter.is_quiet() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!(
        "Uploading {} ({})",
        request.payload.name,
        format_size(request.payload.bytes.len() as u64, BINARY)
    ));
    Some(spinner)
}
