//! CLI command definitions for the `convoy` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod conversations;
pub mod routes;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Serve and inspect project conversations.
#[derive(Parser)]
#[command(name = "convoy", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except warnings and errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to the server configuration file.
    #[arg(long, global = true, env = "CONVOY_CONFIG", default_value = "convoy.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "CONVOY_PORT", default_value_t = 3000)]
        port: u16,

        /// Address to bind.
        #[arg(long, env = "CONVOY_HOST", default_value = "127.0.0.1")]
        host: String,
    },

    /// Read the conversations of a project once and print them as JSON.
    Conversations {
        /// Project identifier.
        project_id: String,

        /// Read deadline in milliseconds (defaults to the configured one).
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Show the edge rewrite table.
    Routes {
        /// Output machine-readable JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn parses_conversations_with_global_flags() {
        let cli = Cli::try_parse_from(["convoy", "-vv", "conversations", "proj-42", "--timeout-ms", "500"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Conversations { project_id, timeout_ms } => {
                assert_eq!(project_id, "proj-42");
                assert_eq!(timeout_ms, Some(500));
            }
            _ => panic!("expected conversations command"),
        }
    }
}
