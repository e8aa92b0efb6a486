//! Question in, sentence out.

use std::sync::Arc;

use taut_database::UserId;
use tracing::{debug, info};

use crate::classifier::IntentClassifier;
use crate::dispatcher::IntentDispatcher;
use crate::error::BotResult;
use crate::formatter::APOLOGY;
use crate::intent::BotRequest;

/// Classifies a question and dispatches it.
#[derive(Clone)]
pub struct Chatbot {
    classifier: Arc<dyn IntentClassifier>,
    dispatcher: IntentDispatcher,
}

impl Chatbot {
    pub fn new(classifier: Arc<dyn IntentClassifier>, dispatcher: IntentDispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &IntentDispatcher {
        &self.dispatcher
    }

    pub async fn ask(&self, question: &str, caller: &UserId) -> BotResult<String> {
        let question = question.trim();
        if question.is_empty() {
            debug!(caller = %caller, "empty question");
            return Ok(APOLOGY.to_string());
        }

        info!(caller = %caller, question, "handling question");

        let payload = self.classifier.classify(question).await?;
        let request = BotRequest::from_payload(&payload, self.dispatcher.local_offset());

        self.dispatcher.dispatch(&request, caller).await
    }
}
