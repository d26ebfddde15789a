mod handlers;
mod progress;
mod state;
mod transport;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use suto_core::metadata::{FfmpegMetadataWriter, MetadataWriter};
use suto_core::pipeline::MediaTransport;
use suto_core::profile::{MemoryProfileStore, ProfileStore, SqliteProfileStore};
use suto_core::rules::{MemoryRuleStore, RuleStore, SqliteRuleStore};
use suto_core::session::SessionManager;
use suto_core::{load_config, validate_config, ChannelId, RenderPipeline, StorageBackend};

use handlers::Command;
use state::AppState;
use transport::TelegramTransport;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("SUTO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Storage backend: {:?}", config.storage.backend);

    let (rules, profiles): (Arc<dyn RuleStore>, Arc<dyn ProfileStore>) =
        match config.storage.backend {
            StorageBackend::Memory => {
                warn!("In-memory storage selected; rules will not survive a restart");
                (
                    Arc::new(MemoryRuleStore::new()),
                    Arc::new(MemoryProfileStore::new()),
                )
            }
            StorageBackend::Sqlite => (
                Arc::new(
                    SqliteRuleStore::new(&config.storage.path)
                        .context("Failed to open rule store")?,
                ),
                Arc::new(
                    SqliteProfileStore::new(&config.storage.path)
                        .context("Failed to open profile store")?,
                ),
            ),
        };
    info!("Stores initialized at {:?}", config.storage.path);

    let metadata = FfmpegMetadataWriter::new(config.metadata.clone());
    if let Err(e) = metadata.validate().await {
        warn!("Metadata writer unavailable ({e}); files will be passed through as plain copies");
    }

    tokio::fs::create_dir_all(&config.scratch.root)
        .await
        .context("Failed to create scratch directory")?;
    let thumb_dir = config.scratch.root.join("thumbs");
    tokio::fs::create_dir_all(&thumb_dir)
        .await
        .context("Failed to create thumbnail directory")?;

    let bot = Bot::new(&config.bot.token);
    let transport: Arc<dyn MediaTransport> = Arc::new(TelegramTransport::new(bot.clone()));

    let pipeline = Arc::new(RenderPipeline::new(
        config.scratch.root.clone(),
        config.bot.log_channel.map(ChannelId),
        Arc::clone(&transport),
        Arc::new(metadata),
        Arc::clone(&profiles),
    ));

    let state = Arc::new(AppState {
        bot_config: config.bot.clone(),
        sessions: SessionManager::new(Arc::clone(&rules)),
        pipeline,
        rules,
        profiles,
        transport,
        thumb_dir,
    });

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to publish command menu: {e}");
    }

    info!("Starting dispatcher");
    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![Arc::clone(&state)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
