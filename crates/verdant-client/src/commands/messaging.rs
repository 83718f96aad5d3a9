//! Messaging and direct-message recency commands.

use chrono::Utc;

use verdant_shared::models::{LastMessage, Message, RecentConversation};
use verdant_store::{MessageDraft, Result, StoreError};

use crate::state::{lock, SharedState};

/// Append a message to a channel as the authenticated user. The sender
/// snapshot is taken from the known-users view at call time.
pub fn send_message(state: &SharedState, channel_id: &str, content: &str) -> Result<Message> {
    let mut app = lock(state);
    let user_id = app
        .session
        .current_user()
        .map(|u| u.id.clone())
        .ok_or(StoreError::Unauthenticated)?;
    let users = app.session.users();
    app.channels.send_message(
        MessageDraft {
            channel_id: channel_id.to_string(),
            user_id,
            content: content.to_string(),
            timestamp: Utc::now(),
        },
        &users,
    )
}

pub fn get_messages(state: &SharedState, channel_id: &str) -> Vec<Message> {
    lock(state)
        .channels
        .messages_for_channel(channel_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Record activity in a direct-message conversation and return the updated
/// recency list.
pub fn touch_conversation(
    state: &SharedState,
    friend_id: &str,
    message: Option<LastMessage>,
) -> Result<Vec<RecentConversation>> {
    let mut app = lock(state);
    Ok(app.recents.touch(friend_id, message)?.to_vec())
}

/// Where a generic "open messages" action should navigate.
pub fn most_recent_conversation(state: &SharedState) -> Option<String> {
    lock(state).recents.most_recent()
}
