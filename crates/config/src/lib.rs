use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "taut.toml",
    "config/taut.toml",
    "crates/config/taut.toml",
    "../taut.toml",
    "../config/taut.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://taut.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for the wit.ai-compatible intent classifier.
///
/// ```
/// use taut_config::ClassifierConfig;
///
/// let classifier = ClassifierConfig::default();
/// assert_eq!(classifier.base_url, "https://api.wit.ai");
/// assert_eq!(classifier.request_timeout_seconds, 10);
/// assert!(classifier.access_token.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "ClassifierConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ClassifierConfig::default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "ClassifierConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ClassifierConfig {
    fn default_base_url() -> String {
        "https://api.wit.ai".to_string()
    }

    fn default_api_version() -> String {
        "20170307".to_string()
    }

    const fn default_request_timeout() -> u64 {
        10
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_version: Self::default_api_version(),
            access_token: None,
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Answer rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Offset from UTC used for day windows and rendered timestamps.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use taut_config::load;
///
/// std::env::remove_var("TAUT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())
        .and_then(|b| b.set_default("http.port", i64::from(defaults.http.port)))
        .and_then(|b| b.set_default("database.url", defaults.database.url.clone()))
        .and_then(|b| {
            b.set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )
        })
        .and_then(|b| b.set_default("classifier.base_url", defaults.classifier.base_url.clone()))
        .and_then(|b| {
            b.set_default(
                "classifier.api_version",
                defaults.classifier.api_version.clone(),
            )
        })
        .and_then(|b| {
            b.set_default(
                "classifier.request_timeout_seconds",
                i64::try_from(defaults.classifier.request_timeout_seconds).unwrap_or(i64::MAX),
            )
        })
        .and_then(|b| {
            b.set_default(
                "bot.utc_offset_minutes",
                i64::from(defaults.bot.utc_offset_minutes),
            )
        })
        .context("unable to register configuration defaults")?;

    let mut builder = builder;
    let environment_overrides = config::Environment::with_prefix("TAUT").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("TAUT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via TAUT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.bot.utc_offset_minutes.abs() >= 24 * 60 {
        anyhow::bail!(
            "invalid configuration: bot.utc_offset_minutes must be within one day, got {}",
            config.bot.utc_offset_minutes
        );
    }

    debug!(
        http = ?config.http,
        database = ?config.database,
        classifier_base_url = %config.classifier.base_url,
        classifier_token_set = config.classifier.access_token.is_some(),
        "loaded backend configuration"
    );
    Ok(config)
}
