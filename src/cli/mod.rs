//! Command-line interface for driving the orchestrator from a terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::domain::errors::TurnError;
use crate::domain::models::{Config, MemoryLayer, TurnRequest};
use crate::domain::ports::MemoryRepository;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::database::{
    DatabaseConnection, SqliteMemoryRepository, SqlitePhotoRepository, SqliteProgressRepository,
};
use crate::infrastructure::oracle::HttpOracle;
use crate::infrastructure::storage::FsAssetStore;
use crate::services::{PhotoGate, SurveyCatalog, TurnOrchestrator};

#[derive(Debug, Parser)]
#[command(name = "rapport", about = "Conversational assessment orchestrator", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from this file instead of the hierarchy.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the project directories, write a default config, and run
    /// database migrations.
    Init,
    /// Handle one inbound turn and print the visible reply.
    Turn(TurnArgs),
    /// Print a user's transcript.
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct TurnArgs {
    /// User the turn belongs to.
    #[arg(long)]
    pub user: String,

    /// Free text typed by the user.
    #[arg(long)]
    pub text: Option<String>,

    /// Control text asserted by the client on the assistant's behalf.
    #[arg(long)]
    pub control: Option<String>,

    /// Staged image reference attached to this turn.
    #[arg(long)]
    pub image: Vec<String>,

    /// Emit the outcome as a JSON envelope on stdout instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Failure envelope for `--json` output; carries only the generic message
/// and the stable category, never internal detail.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error_message: &'static str,
    category: &'static str,
}

impl From<&TurnError> for ErrorEnvelope {
    fn from(err: &TurnError) -> Self {
        Self { error_message: err.user_message(), category: err.category() }
    }
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub user: String,

    /// Memory layer to print.
    #[arg(long, default_value = "short")]
    pub layer: String,

    /// Most-recent turns to include.
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Load configuration honoring the global `--config` override.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Init => init(&config).await,
        Commands::Turn(args) => turn(&config, args).await,
        Commands::History(args) => history(&config, args).await,
    }
}

async fn init(config: &Config) -> Result<()> {
    std::fs::create_dir_all(".rapport").context("failed to create .rapport")?;
    std::fs::create_dir_all(&config.photo.staging_dir)
        .context("failed to create staging directory")?;
    std::fs::create_dir_all(&config.photo.permanent_dir)
        .context("failed to create photo directory")?;

    let config_path = std::path::Path::new(".rapport/config.yaml");
    if !config_path.exists() {
        let yaml = serde_yaml::to_string(config).context("failed to render config")?;
        std::fs::write(config_path, yaml).context("failed to write config file")?;
    }

    let db = DatabaseConnection::new(&config.database.url).await?;
    db.migrate().await?;
    println!("initialized");
    Ok(())
}

async fn turn(config: &Config, args: TurnArgs) -> Result<()> {
    let db = DatabaseConnection::new(&config.database.url).await?;
    db.migrate().await?;
    let pool = db.pool();

    let memory = Arc::new(SqliteMemoryRepository::new(pool.clone()));
    let progress = Arc::new(SqliteProgressRepository::new(pool.clone()));
    let photos = Arc::new(SqlitePhotoRepository::new(pool));
    let oracle = Arc::new(HttpOracle::new(&config.oracle)?);
    let assets = Arc::new(FsAssetStore::new(
        &config.photo.staging_dir,
        &config.photo.permanent_dir,
    ));
    let catalog = SurveyCatalog::load()?;
    let gate = PhotoGate::new(config.photo.poll_interval_ms, config.photo.max_poll_attempts);

    let orchestrator = TurnOrchestrator::new(
        memory,
        progress,
        photos,
        oracle,
        assets,
        catalog,
        &config.oracle,
        gate,
    );

    let request = TurnRequest {
        free_text: args.text,
        client_control_text: args.control,
        image_refs: args.image,
    };
    match orchestrator.handle_turn(&args.user, &request).await {
        Ok(reply) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string(&reply).context("failed to render reply")?
                );
            } else {
                println!("{}", reply.visible_text);
            }
            Ok(())
        }
        Err(err) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string(&ErrorEnvelope::from(&err))
                        .context("failed to render error")?
                );
            } else {
                eprintln!("{}: {}", err.category(), err.user_message());
            }
            Err(err.into())
        }
    }
}

async fn history(config: &Config, args: HistoryArgs) -> Result<()> {
    let db = DatabaseConnection::new(&config.database.url).await?;
    db.migrate().await?;

    let layer: MemoryLayer = args
        .layer
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let memory = SqliteMemoryRepository::new(db.pool());
    let turns = memory
        .history_ascending(&args.user, layer, args.limit)
        .await?;
    for turn in turns {
        println!(
            "{} [{}] {}",
            turn.created_at.to_rfc3339(),
            turn.speaker,
            turn.content
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TurnReply;

    #[test]
    fn json_reply_envelope_carries_the_visible_text() {
        let reply = TurnReply::new("hello there");
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"visible_text":"hello there"}"#);
    }

    #[test]
    fn json_error_envelope_never_leaks_internal_detail() {
        let err = TurnError::Store("disk on fire".to_string());
        let json = serde_json::to_string(&ErrorEnvelope::from(&err)).unwrap();
        assert!(json.contains(r#""category":"upstream_unavailable""#));
        assert!(!json.contains("disk"));
    }
}
