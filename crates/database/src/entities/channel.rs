//! Channel entity definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::UserId;

/// Opaque channel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A channel together with its member set.
///
/// Names are not unique. A channel without members carries an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<UserId>,
}

impl Channel {
    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChannel {
    pub id: ChannelId,
    pub name: String,
    pub members: Vec<UserId>,
}
