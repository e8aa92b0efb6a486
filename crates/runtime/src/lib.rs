use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use sqlx::SqlitePool;
use taut_chatbot::{Chatbot, IntentClassifier, IntentDispatcher, SqliteChatStore, WitClassifier};
use taut_config::{AppConfig, BotConfig};
use taut_database::initialize_database;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub chatbot: Chatbot,
}

impl BackendServices {
    /// Open the database and connect the wit.ai classifier.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let classifier =
            WitClassifier::new(&config.classifier).context("failed to build intent classifier")?;
        info!(base_url = %config.classifier.base_url, version = %config.classifier.api_version, "intent classifier ready");

        Self::with_classifier(config, Arc::new(classifier)).await
    }

    pub async fn with_classifier(
        config: &AppConfig,
        classifier: Arc<dyn IntentClassifier>,
    ) -> Result<Self> {
        let local = local_offset(&config.bot)?;
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let dispatcher = IntentDispatcher::new(Arc::new(SqliteChatStore::new(db_pool.clone())), local);
        info!(utc_offset = %local, "chatbot ready");

        Ok(Self {
            db_pool,
            chatbot: Chatbot::new(classifier, dispatcher),
        })
    }
}

/// The fixed offset used for day windows and rendered times.
pub fn local_offset(config: &BotConfig) -> Result<FixedOffset> {
    FixedOffset::east_opt(config.utc_offset_minutes * 60)
        .with_context(|| format!("invalid utc offset: {} minutes", config.utc_offset_minutes))
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
