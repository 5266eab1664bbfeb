//! Command-line surface for sf.

use clap::Parser;

/// Send a file to a remote server over SFTP
#[derive(Parser, Debug)]
#[command(name = "sf", version, about)]
pub struct Cli {
    /// Path of the local file to send
    pub file: String,

    /// Destination folder on the server (absolute, e.g. /incoming)
    pub target_folder: String,

    /// Server address (e.g. ssh://files.example.com)
    pub host: String,

    /// User name to authenticate as
    pub user: String,

    /// Server port
    #[arg(short, long, default_value_t = 22, allow_negative_numbers = true)]
    pub port: i32,

    /// Password; prefer the environment variable over the flag
    #[arg(long, env = "SENDFILE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Base64-encoded private key
    #[arg(long = "base64-key", env = "SENDFILE_BASE64_KEY", hide_env_values = true)]
    pub base64_key: Option<String>,

    /// Path to a private key file (~ is expanded)
    #[arg(long = "key-file")]
    pub key_file: Option<String>,

    /// Skip host key verification
    #[arg(long)]
    pub insecure: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn port_defaults_to_ssh() {
        let args =
            Cli::try_parse_from(["sf", "report.txt", "/incoming", "ssh://example.com", "alice"])
                .unwrap();
        assert_eq!(args.port, 22);
        assert!(args.password.is_none());
        assert!(!args.insecure);
    }

    #[test]
    fn negative_port_reaches_validation() {
        let args = Cli::try_parse_from([
            "sf",
            "report.txt",
            "/incoming",
            "ssh://example.com",
            "alice",
            "--port",
            "-1",
        ])
        .unwrap();
        assert_eq!(args.port, -1);
    }
}
