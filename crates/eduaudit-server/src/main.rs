//! EduAudit server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds an
//! in-memory grievance store, and serves the JSON API over HTTP. Environment
//! variables prefixed `EDUAUDIT_` override file settings, so
//! `EDUAUDIT_OPENAI_API_KEY=sk-…` is enough to turn the AI features on.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use eduaudit_ai::{AiConfig, AiServices};
use eduaudit_server::{AppState, ServerConfig, session::SessionStore};
use eduaudit_store_mem::MemStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "EduAudit grievance server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("EDUAUDIT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = if server_cfg.seed_districts {
    MemStore::seeded()
  } else {
    MemStore::new()
  };

  if server_cfg.openai_api_key.is_none() {
    tracing::info!("no OpenAI key configured; AI features use fallbacks");
  }
  let ai = AiServices::new(AiConfig {
    api_key:  server_cfg.openai_api_key.clone(),
    base_url: server_cfg.openai_base_url.clone(),
    model:    server_cfg.openai_model.clone(),
  });

  // Build application state.
  let state = AppState {
    store:    Arc::new(store),
    sessions: Arc::new(SessionStore::new()),
    ai:       Arc::new(ai),
  };

  let app = eduaudit_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
