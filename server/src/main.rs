use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use padikk_backend_api::{build_router, AppState};
use padikk_backend_runtime::{shutdown_signal, telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "padikk-backend", version, about = "Naalu Aksharam Padikk backend")]
struct Cli {
    /// Configuration file, overrides `PADIKK_CONFIG`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Apply database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing()?;

    if let Some(path) = &cli.config {
        std::env::set_var("PADIKK_CONFIG", path);
    }

    let config = padikk_config::load().context("failed to load configuration")?;
    let services = BackendServices::initialise(&config).await?;

    if matches!(cli.command, Some(Command::Migrate)) {
        info!(database = %config.database.url, "migrations applied");
        return Ok(());
    }

    let state = AppState::new(
        services.db_pool.clone(),
        services.authenticator.clone(),
        services.semsense.clone(),
    )
    .with_allowed_origins(config.http.allowed_origins.clone());

    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, semsense = services.semsense.is_configured(), "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::parse_from(["padikk-backend"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_config_and_migrate() {
        let cli = Cli::parse_from(["padikk-backend", "--config", "padikk.toml", "migrate"]);
        assert_eq!(cli.config, Some(PathBuf::from("padikk.toml")));
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(Cli::try_parse_from(["padikk-backend", "seed"]).is_err());
    }
}
