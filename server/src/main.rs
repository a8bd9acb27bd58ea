//! mixform schema server
//!
//! Serves trigger-based form evaluation and schema authoring over HTTP.
//!
//! Usage:
//!   mixform-server --config mixform.toml --port 8080
//!
//! Without a schema directory every schema lives in memory and is lost on exit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mixform_eval::Evaluator;
use mixform_server::{build_router, AppState, ServerConfig, DEFAULT_CONFIG_FILE};
use mixform_store::demo::install_demo;
use mixform_store::{DirSchemaStore, MemorySchemaStore, SchemaStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mixform-server")]
#[command(about = "Schema evaluation and authoring API for mixform")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Address to bind (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory of schema documents (overrides the config file)
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Install the "decimal" demo schema if it is missing
    #[arg(long)]
    seed_demo: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = &self.schema_dir {
            config.schema_dir = Some(dir.clone());
        }
        if self.seed_demo {
            config.seed_demo = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("mixform server starting...");
    let mut config = ServerConfig::load_from(&args.config);
    args.apply(&mut config);

    let store = open_store(&config)?;
    let state = AppState::new(store, Evaluator::with_config(config.evaluator_config()));
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("mixform server stopped");
    Ok(())
}

fn open_store(config: &ServerConfig) -> Result<Arc<dyn SchemaStore>> {
    let store: Arc<dyn SchemaStore> = match &config.schema_dir {
        Some(dir) => Arc::new(
            DirSchemaStore::open(dir)
                .with_context(|| format!("Failed to open schema directory {}", dir.display()))?,
        ),
        None => {
            info!("No schema directory configured, schemas are kept in memory");
            Arc::new(MemorySchemaStore::new())
        }
    };

    if config.seed_demo {
        install_demo(store.as_ref(), config.demo_depth).context("Failed to install demo schema")?;
    }
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
