//! Convoy CLI and HTTP entry point.
//!
//! Binary name: `convoy`
//!
//! Parses CLI arguments, initializes tracing, then either starts the HTTP
//! server or runs a one-shot command.

mod cli;
mod http;
mod state;

use clap::Parser;

use convoy_infra::config::load_server_config;
use convoy_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use http::rewrite::RewriteTable;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tracing_options = TracingOptions {
        json: cli.log_json,
        otel: cli.otel,
        ..TracingOptions::for_verbosity(cli.verbose, cli.quiet)
    };
    init_tracing(&tracing_options).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let state = AppState::init(&cli.config).await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Convoy listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Conversations {
            project_id,
            timeout_ms,
        } => {
            let state = AppState::init(&cli.config).await?;
            cli::conversations::list_conversations(&state, &project_id, timeout_ms).await?;
        }

        Commands::Routes { json } => {
            // Only the config file is needed; no backend credentials.
            let config = load_server_config(&cli.config).await;
            let table = RewriteTable::from_config(&config.routing)?;
            cli::routes::show_routes(&table, json)?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
