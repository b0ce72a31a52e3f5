mod check_cmd;
mod states_cmd;
mod status_cmd;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use garden_catalog::Catalog;
use garden_config::{GardenConfig, ServerConfig};
use garden_core::{RandomSource, SeededRandom, SystemClock, ThreadRandom};
use garden_gateway::{GatewayState, shutdown_signal, start_server};
use garden_sessions::InMemorySessionStore;

#[derive(Parser)]
#[command(name = "mindful-garden")]
#[command(about = "Mindful Garden: a reflective conversation service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
        /// Config file (defaults to the config directory's config.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Query a running server's health endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the emotional state table
    States {
        /// Catalog file (defaults to the embedded catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Validate the config and catalog
    Check {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind, config } => {
            let mut config = garden_config::load_resolved(&config_path(config)).await?;
            let server = config.server.get_or_insert_with(ServerConfig::default);
            if let Some(port) = port {
                server.port = Some(port);
            }
            if let Some(bind) = bind {
                server.bind = Some(bind);
            }

            garden_logging::init_logger(config.log_level(), config.log_dir(), config.log_json())?;
            let config = garden_config::prepare(config)?;
            run_server(config).await?;
        }
        Commands::Status { port } => {
            garden_logging::init_logger("warn", None, false)?;
            let port = match port {
                Some(port) => port,
                None => garden_config::load_resolved(&config_path(None)).await?.port(),
            };
            status_cmd::run(port).await?;
        }
        Commands::States { catalog } => {
            garden_logging::init_logger("warn", None, false)?;
            states_cmd::run(catalog.as_deref()).await?;
        }
        Commands::Check { config } => {
            garden_logging::init_logger("warn", None, false)?;
            check_cmd::run(&config_path(config)).await?;
        }
    }

    Ok(())
}

fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| garden_config::config_file_path(&garden_config::config_dir()))
}

async fn run_server(config: GardenConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind(), config.port())
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.bind(), config.port()))?;

    let catalog = Arc::new(Catalog::load(config.catalog_path()).await?);
    info!(
        states = catalog.states().len(),
        transitions = catalog.transition_count(),
        "Catalog loaded"
    );

    let random: Arc<dyn RandomSource> = match config.response_seed() {
        Some(seed) => {
            info!(seed, "Using seeded response selection");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };
    let clock = Arc::new(SystemClock);
    let sessions = Arc::new(InMemorySessionStore::new(clock.clone()));
    let state = GatewayState::new(catalog, sessions, random, clock);

    info!(%addr, "Starting Mindful Garden");
    start_server(addr, state, shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "mindful-garden",
            "serve",
            "--port",
            "6000",
            "--bind",
            "127.0.0.1",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { port, bind, config } => {
                assert_eq!(port, Some(6000));
                assert_eq!(bind.as_deref(), Some("127.0.0.1"));
                assert!(config.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = config_path(Some(PathBuf::from("/tmp/garden.yaml")));
        assert_eq!(path, PathBuf::from("/tmp/garden.yaml"));
        assert!(config_path(None).ends_with("config.yaml"));
    }
}
