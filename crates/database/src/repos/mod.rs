//! Database repository implementations

pub mod channel_repository;
pub mod message_repository;
pub mod user_repository;

pub use channel_repository::*;
pub use message_repository::*;
pub use user_repository::*;
