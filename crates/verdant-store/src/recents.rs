//! The recency tracker: per-friend ordering of direct-message
//! conversations.
//!
//! "Move to top" is remove-then-prepend, which makes touching a friend
//! idempotent with respect to list membership. The list is never sorted:
//! its order *is* the touch order, so equal timestamps cannot reorder
//! entries. Capped at the 10 most recent conversations.

use chrono::Utc;

use verdant_shared::constants::MAX_RECENT_CONVERSATIONS;
use verdant_shared::models::{LastMessage, RecentConversation};
use verdant_shared::seed;

use crate::error::Result;
use crate::storage::Storage;

const RECENTS_SLOT: &str = "recent_conversations";

pub struct RecencyTracker {
    storage: Storage,
    entries: Vec<RecentConversation>,
}

impl RecencyTracker {
    /// Hydrate the list, tolerating an oversized slot by trimming it.
    pub fn new(storage: Storage) -> Self {
        let mut entries: Vec<RecentConversation> =
            storage.read_slot(RECENTS_SLOT).unwrap_or_default();
        entries.truncate(MAX_RECENT_CONVERSATIONS);
        Self { storage, entries }
    }

    /// Tracked conversations, most recent first.
    pub fn entries(&self) -> &[RecentConversation] {
        &self.entries
    }

    /// Record activity with a friend: remove any existing entry, prepend a
    /// fresh one, trim to the cap, persist, and return the updated list.
    ///
    /// When no `message` is supplied (the conversation was merely opened),
    /// the previous last message is carried forward so the row still shows
    /// prior content.
    pub fn touch(
        &mut self,
        friend_id: &str,
        message: Option<LastMessage>,
    ) -> Result<&[RecentConversation]> {
        let previous = self
            .entries
            .iter()
            .find(|e| e.friend_id == friend_id)
            .and_then(|e| e.last_message.clone());

        let mut updated: Vec<RecentConversation> = Vec::with_capacity(self.entries.len() + 1);
        updated.push(RecentConversation {
            friend_id: friend_id.to_string(),
            last_accessed: Utc::now(),
            last_message: message.or(previous),
        });
        updated.extend(
            self.entries
                .iter()
                .filter(|e| e.friend_id != friend_id)
                .cloned(),
        );
        updated.truncate(MAX_RECENT_CONVERSATIONS);

        self.storage.write_slot(RECENTS_SLOT, &updated)?;
        self.entries = updated;

        tracing::debug!(friend_id = %friend_id, "conversation touched");
        Ok(&self.entries)
    }

    /// The friend a generic "open messages" action should navigate to: the
    /// most recently touched conversation, falling back to the first entry
    /// of the static friends list when nothing has been tracked.
    pub fn most_recent(&self) -> Option<String> {
        self.entries
            .first()
            .map(|e| e.friend_id.clone())
            .or_else(|| seed::seed_friends().first().map(|f| f.id.clone()))
    }
}
