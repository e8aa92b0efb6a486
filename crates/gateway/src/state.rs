//! Shared application state for the gateway

use taut_chatbot::Chatbot;

/// State handed to every handler
#[derive(Clone)]
pub struct GatewayState {
    pub chatbot: Chatbot,
}

impl GatewayState {
    pub fn new(chatbot: Chatbot) -> Self {
        Self { chatbot }
    }

    pub fn chatbot(&self) -> &Chatbot {
        &self.chatbot
    }
}
