//! Natural-language classification of questions into intents and entities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use taut_config::ClassifierConfig;
use thiserror::Error;
use tracing::debug;

use crate::intent::ClassifierPayload;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("missing classifier access token")]
    MissingToken,
    #[error("classifier http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Turns free text into `{intent, entities}`.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierPayload, ClassifierError>;
}

/// Client for the wit.ai `/message` endpoint.
#[derive(Debug, Clone)]
pub struct WitClassifier {
    client: Client,
    base_url: String,
    api_version: String,
    access_token: String,
}

impl WitClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ClassifierError::MissingToken)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            access_token,
        })
    }
}

#[async_trait]
impl IntentClassifier for WitClassifier {
    async fn classify(&self, text: &str) -> Result<ClassifierPayload, ClassifierError> {
        let url = format!("{}/message", self.base_url);

        let payload: ClassifierPayload = self
            .client
            .get(url)
            .query(&[("v", self.api_version.as_str()), ("q", text)])
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(intent = ?payload.intent_name(), entities = payload.entities.len(), "classified question");
        Ok(payload)
    }
}
