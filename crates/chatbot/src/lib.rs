//! # Taut Chatbot Crate
//!
//! Answers questions about channels, their members and their messages.
//!
//! ## Architecture
//!
//! - **Classifier**: free text to `{intent, entities}` (wit.ai client)
//! - **Intent**: typed intents and validated entities
//! - **Resolver**: channel fragments to channels, member ids to first names
//! - **Handlers**: the five analytic queries
//! - **Formatter**: handler results to sentences
//! - **Dispatcher**: intent to handler, with a uniform fallback
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taut_chatbot::{IntentDispatcher, SqliteChatStore, BotRequest, Intent, Entities};
//!
//! let dispatcher = IntentDispatcher::new(Arc::new(SqliteChatStore::new(pool)), offset);
//! let request = BotRequest::new(Intent::GetUsers, Entities { channel: Some("general".into()), datetime: None });
//! let sentence = dispatcher.dispatch(&request, &caller).await?;
//! ```

pub mod bot;
pub mod classifier;
pub mod day;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod identity;
pub mod intent;
pub mod resolver;
pub mod store;

pub use bot::Chatbot;
pub use classifier::{ClassifierError, IntentClassifier, WitClassifier};
pub use day::LocalDay;
pub use dispatcher::IntentDispatcher;
pub use error::{BotError, BotResult, QueryError};
pub use formatter::{ordinal, ResponseFormatter, APOLOGY, NO_MEMBERS, NO_POSTERS};
pub use handlers::Answer;
pub use identity::{resolve_caller, Caller, IdentityError};
pub use intent::{BotRequest, ClassifierPayload, DateEntity, Entities, EntityValue, Intent};
pub use resolver::EntityResolver;
pub use store::{ChatStore, SqliteChatStore};
