//! sf: send a file to a remote server over SFTP.
//!
//! The only place that turns a pipeline result into a process exit
//! code; everything below reports through `Validated` values.

mod cli;
mod commands;
mod exit_code;
mod output;

use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::output::OutputConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let output_config = OutputConfig {
        json: args.json,
        quiet: args.quiet,
        no_color: args.no_color,
    };

    let exit_code = commands::send::execute(args, output_config).await;
    std::process::exit(exit_code.into());
}
