//! Domain entities for the database layer
//!
//! Read models for the three collections the chatbot queries.

pub mod channel;
pub mod message;
pub mod user;

pub use channel::{Channel, ChannelId, NewChannel};
pub use message::{Message, NewMessage, PosterCount, TimeWindow};
pub use user::{NewUser, User, UserId};
