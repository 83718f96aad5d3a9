//! Domain model structs persisted in the local key-value slots.
//!
//! Every struct derives `Serialize` and `Deserialize` so it round-trips
//! through the JSON persistence layer unchanged. Ids are plain strings:
//! freshly created records get UUIDv4 strings, seed data keeps the short
//! numeric ids the application shipped with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Presence status shown next to a user or friend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Idle,
    Dnd,
    Offline,
}

/// A user identity. The authenticated identity is one of these; the rest
/// are read-only seed data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Four-digit tag rendered after the username ("alex#1234").
    pub discriminator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_status: Option<String>,
}

/// The subset of a user embedded in a message at send time.
///
/// Intentionally a copy: later profile edits must not rewrite history, so
/// a message keeps the username/avatar the sender had when it was sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Server (guild)
// ---------------------------------------------------------------------------

/// A server (also called "guild") that groups channels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// What kind of traffic a channel carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Text,
    Voice,
    Video,
}

/// A channel inside a server. `server_id` is never empty: every channel
/// belongs to exactly one server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub server_id: String,
    pub name: String,
    pub kind: ChannelKind,
    #[serde(default)]
    pub private: bool,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message, denormalized with the sender snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// `None` when the sender was unknown at send time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSnapshot>,
}

// ---------------------------------------------------------------------------
// Friend
// ---------------------------------------------------------------------------

/// A direct-message contact from the static friends list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Friend {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

// ---------------------------------------------------------------------------
// Recency tracking
// ---------------------------------------------------------------------------

/// The last message shown in a recent-conversation row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastMessage {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_me: bool,
}

/// Bookkeeping record ordering direct-message conversations by last
/// activity. Unique per friend; the list holding these is capped at
/// [`crate::constants::MAX_RECENT_CONVERSATIONS`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentConversation {
    pub friend_id: String,
    pub last_accessed: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
}
