//! The channel & messaging store: channels per server, messages per
//! channel, and voice-channel rosters.
//!
//! Three slots are written through independently (channels, messages,
//! rosters); no operation needs cross-slot atomicity. The channel
//! selection is runtime-only state and is not persisted.
//!
//! Rosters are sets: joining a channel twice is a no-op, as is leaving a
//! channel one is not in. A roster hydrated from an older slot is
//! deduplicated on the way in.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use verdant_shared::constants::{DEFAULT_TEXT_CHANNEL, DEFAULT_VOICE_CHANNEL, MAX_MESSAGE_CHARS};
use verdant_shared::models::{Channel, ChannelKind, Message, User, UserSnapshot};
use verdant_shared::seed;

use crate::error::{Result, StoreError};
use crate::storage::Storage;

const CHANNELS_SLOT: &str = "verdant_channels";
const MESSAGES_SLOT: &str = "verdant_messages";
const VOICE_ROSTERS_SLOT: &str = "verdant_voice_channel_users";

/// Fields for an explicit channel creation.
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub server_id: String,
    pub name: String,
    pub kind: ChannelKind,
    pub private: bool,
}

/// Fields for a message send; the sender snapshot is attached by the store.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub channel_id: String,
    pub user_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A server's channels split by kind, the way the sidebar renders them.
#[derive(Debug, Clone, Default)]
pub struct ChannelLists {
    pub text: Vec<Channel>,
    pub voice: Vec<Channel>,
    pub video: Vec<Channel>,
}

pub struct ChannelStore {
    storage: Storage,
    channels: Vec<Channel>,
    messages: Vec<Message>,
    rosters: BTreeMap<String, BTreeSet<String>>,
    current_channel_id: Option<String>,
    /// Server ids already checked for default channels this session, so
    /// repeated observation of the same empty server provisions only once.
    provisioned: HashSet<String>,
}

impl ChannelStore {
    /// Hydrate channels, messages and rosters, seeding defaults on first
    /// run.
    pub fn new(storage: Storage) -> Result<Self> {
        let channels = match storage.read_slot(CHANNELS_SLOT) {
            Some(list) => list,
            None => {
                let seeds = seed::default_channels();
                storage.write_slot(CHANNELS_SLOT, &seeds)?;
                seeds
            }
        };

        let messages = match storage.read_slot(MESSAGES_SLOT) {
            Some(list) => list,
            None => {
                let seeds = seed::default_messages();
                storage.write_slot(MESSAGES_SLOT, &seeds)?;
                seeds
            }
        };

        // Older slots may hold duplicate user ids; collecting into sets
        // cleans them up.
        let rosters = storage
            .read_slot::<BTreeMap<String, Vec<String>>>(VOICE_ROSTERS_SLOT)
            .map(|raw| {
                raw.into_iter()
                    .map(|(channel_id, users)| (channel_id, users.into_iter().collect()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            storage,
            channels,
            messages,
            rosters,
            current_channel_id: None,
            provisioned: HashSet::new(),
        })
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Channels of a server, in insertion order.
    pub fn list_channels(&self, server_id: &str) -> Vec<&Channel> {
        self.channels
            .iter()
            .filter(|c| c.server_id == server_id)
            .collect()
    }

    /// Channels of a server split by kind.
    pub fn channel_lists(&self, server_id: &str) -> ChannelLists {
        let mut lists = ChannelLists::default();
        for channel in self.channels.iter().filter(|c| c.server_id == server_id) {
            match channel.kind {
                ChannelKind::Text => lists.text.push(channel.clone()),
                ChannelKind::Voice => lists.voice.push(channel.clone()),
                ChannelKind::Video => lists.video.push(channel.clone()),
            }
        }
        lists
    }

    /// Create a channel with a fresh id.
    pub fn create_channel(&mut self, new: NewChannel) -> Result<Channel> {
        if new.name.trim().is_empty() {
            return Err(StoreError::Validation("channel name is required".into()));
        }

        let channel = Channel {
            id: Uuid::new_v4().to_string(),
            server_id: new.server_id,
            name: new.name,
            kind: new.kind,
            private: new.private,
        };

        self.channels.push(channel.clone());
        if let Err(e) = self.storage.write_slot(CHANNELS_SLOT, &self.channels) {
            self.channels.pop();
            return Err(e);
        }

        tracing::info!(channel_id = %channel.id, name = %channel.name, "channel created");
        Ok(channel)
    }

    /// Delete a channel. Cascades: the channel's messages are dropped, its
    /// voice roster entry is dropped, and if it was selected the selection
    /// moves to the first sibling channel in the same server, or to none.
    pub fn delete_channel(&mut self, id: &str) -> Result<()> {
        let channel = self.channel(id).cloned().ok_or(StoreError::NotFound)?;

        let channels: Vec<Channel> = self.channels.iter().filter(|c| c.id != id).cloned().collect();
        let messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.channel_id != id)
            .cloned()
            .collect();
        let mut rosters = self.rosters.clone();
        rosters.remove(id);

        self.storage.write_slot(CHANNELS_SLOT, &channels)?;
        self.storage.write_slot(MESSAGES_SLOT, &messages)?;
        self.storage.write_slot(VOICE_ROSTERS_SLOT, &rosters)?;
        self.channels = channels;
        self.messages = messages;
        self.rosters = rosters;

        if self.current_channel_id.as_deref() == Some(id) {
            self.current_channel_id = self
                .channels
                .iter()
                .find(|c| c.server_id == channel.server_id)
                .map(|c| c.id.clone());
        }

        tracing::info!(channel_id = %id, "channel deleted");
        Ok(())
    }

    /// Select a channel, or `None` to clear. The id must exist.
    pub fn select_channel(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if self.channel(id).is_none() {
                return Err(StoreError::NotFound);
            }
        }
        self.current_channel_id = id.map(String::from);
        Ok(())
    }

    pub fn current_channel_id(&self) -> Option<&str> {
        self.current_channel_id.as_deref()
    }

    pub fn current_channel(&self) -> Option<&Channel> {
        self.current_channel_id
            .as_deref()
            .and_then(|id| self.channel(id))
    }

    /// Synthesize the default text and voice channels for a server that
    /// has none. Runs at most once per server id per session; a server
    /// that already has channels is only marked as checked.
    pub fn ensure_default_channels(&mut self, server_id: &str) -> Result<()> {
        if self.provisioned.contains(server_id) {
            return Ok(());
        }
        if self.channels.iter().any(|c| c.server_id == server_id) {
            self.provisioned.insert(server_id.to_string());
            return Ok(());
        }

        let defaults = [
            Channel {
                id: Uuid::new_v4().to_string(),
                server_id: server_id.to_string(),
                name: DEFAULT_TEXT_CHANNEL.into(),
                kind: ChannelKind::Text,
                private: false,
            },
            Channel {
                id: Uuid::new_v4().to_string(),
                server_id: server_id.to_string(),
                name: DEFAULT_VOICE_CHANNEL.into(),
                kind: ChannelKind::Voice,
                private: false,
            },
        ];

        let mut channels = self.channels.clone();
        channels.extend(defaults);
        self.storage.write_slot(CHANNELS_SLOT, &channels)?;
        self.channels = channels;
        self.provisioned.insert(server_id.to_string());

        tracing::info!(server_id = %server_id, "provisioned default channels");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages of a channel, in send order.
    pub fn messages_for_channel(&self, channel_id: &str) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .collect()
    }

    /// Append a message, attaching a snapshot of the sender looked up in
    /// `users` at call time. The snapshot is never updated afterwards.
    ///
    /// Callers are expected to have validated that the channel exists.
    pub fn send_message(&mut self, draft: MessageDraft, users: &[User]) -> Result<Message> {
        if draft.content.trim().is_empty() {
            return Err(StoreError::Validation("message content is empty".into()));
        }
        let chars = draft.content.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(StoreError::Validation(format!(
                "message exceeds {MAX_MESSAGE_CHARS} characters ({chars})"
            )));
        }

        let user = users
            .iter()
            .find(|u| u.id == draft.user_id)
            .map(UserSnapshot::from);
        let message = Message {
            id: Uuid::new_v4().to_string(),
            channel_id: draft.channel_id,
            user_id: draft.user_id,
            content: draft.content,
            timestamp: draft.timestamp,
            user,
        };

        self.messages.push(message.clone());
        if let Err(e) = self.storage.write_slot(MESSAGES_SLOT, &self.messages) {
            self.messages.pop();
            return Err(e);
        }

        tracing::info!(channel_id = %message.channel_id, user_id = %message.user_id, "message sent");
        Ok(message)
    }

    // ------------------------------------------------------------------
    // Voice rosters
    // ------------------------------------------------------------------

    /// User ids currently in a voice/video channel, sorted.
    pub fn roster(&self, channel_id: &str) -> Vec<&str> {
        self.rosters
            .get(channel_id)
            .map(|r| r.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn rosters(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.rosters
    }

    /// Add a user to a channel roster. Joining a channel the user is
    /// already in is a no-op and does not rewrite the slot.
    pub fn join_voice_channel(&mut self, channel_id: &str, user_id: &str) -> Result<()> {
        if self
            .rosters
            .get(channel_id)
            .is_some_and(|r| r.contains(user_id))
        {
            return Ok(());
        }

        self.rosters
            .entry(channel_id.to_string())
            .or_default()
            .insert(user_id.to_string());
        if let Err(e) = self.storage.write_slot(VOICE_ROSTERS_SLOT, &self.rosters) {
            if let Some(roster) = self.rosters.get_mut(channel_id) {
                roster.remove(user_id);
            }
            return Err(e);
        }

        tracing::info!(channel_id = %channel_id, user_id = %user_id, "joined voice channel");
        Ok(())
    }

    /// Remove a user from a channel roster. Leaving a channel the user is
    /// not in is a no-op. The entry stays (possibly empty) once created.
    pub fn leave_voice_channel(&mut self, channel_id: &str, user_id: &str) -> Result<()> {
        let Some(roster) = self.rosters.get_mut(channel_id) else {
            return Ok(());
        };
        if !roster.remove(user_id) {
            return Ok(());
        }

        if let Err(e) = self.storage.write_slot(VOICE_ROSTERS_SLOT, &self.rosters) {
            if let Some(roster) = self.rosters.get_mut(channel_id) {
                roster.insert(user_id.to_string());
            }
            return Err(e);
        }

        tracing::info!(channel_id = %channel_id, user_id = %user_id, "left voice channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> ChannelStore {
        ChannelStore::new(Storage::open_at(dir.path()).unwrap()).unwrap()
    }

    fn draft(channel_id: &str, user_id: &str, content: impl Into<String>) -> MessageDraft {
        MessageDraft {
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn first_run_seeds_channels_and_messages() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        assert_eq!(store.channels().len(), 6);
        assert_eq!(store.messages_for_channel("1").len(), 4);

        let lists = store.channel_lists("1");
        assert_eq!(lists.text.len(), 2);
        assert_eq!(lists.voice.len(), 1);
        assert_eq!(lists.video.len(), 1);
    }

    #[test]
    fn create_channel_requires_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let before = store.channels().len();

        let result = store.create_channel(NewChannel {
            server_id: "1".into(),
            name: "   ".into(),
            kind: ChannelKind::Text,
            private: false,
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.channels().len(), before);
    }

    #[test]
    fn delete_cascades_messages_roster_and_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        store.join_voice_channel("1", "u1").unwrap();
        store.select_channel(Some("1")).unwrap();
        let other_messages = store.messages_for_channel("5").len();

        store.delete_channel("1").unwrap();
        assert!(store.channel("1").is_none());
        assert!(store.messages_for_channel("1").is_empty());
        assert!(store.roster("1").is_empty());
        assert_eq!(store.messages_for_channel("5").len(), other_messages);

        // Selection moved to the first sibling in the same server.
        assert_eq!(store.current_channel_id(), Some("2"));
    }

    #[test]
    fn delete_last_channel_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        store.select_channel(Some("5")).unwrap();
        store.delete_channel("5").unwrap();
        // One sibling remains in server 2.
        assert_eq!(store.current_channel_id(), Some("6"));

        store.select_channel(Some("6")).unwrap();
        store.delete_channel("6").unwrap();
        assert!(store.current_channel_id().is_none());
    }

    #[test]
    fn delete_unknown_channel_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        assert!(matches!(
            store.delete_channel("ghost"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn send_message_attaches_sender_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let mut users = seed::seed_users();

        let message = store.send_message(draft("1", "2", "hi"), &users).unwrap();
        assert_eq!(message.content, "hi");
        assert_eq!(
            message.user.as_ref().map(|u| u.username.as_str()),
            Some("alex")
        );

        // A later rename must not rewrite the stored snapshot.
        users[1].username = "alexander".into();
        let stored = store
            .messages_for_channel("1")
            .last()
            .and_then(|m| m.user.clone())
            .unwrap();
        assert_eq!(stored.username, "alex");

        // An unknown sender simply has no snapshot.
        let message = store.send_message(draft("1", "ghost", "hello"), &users).unwrap();
        assert!(message.user.is_none());
    }

    #[test]
    fn send_message_enforces_length_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let users = seed::seed_users();

        assert!(matches!(
            store.send_message(draft("1", "1", ""), &users),
            Err(StoreError::Validation(_))
        ));

        let at_cap = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(store.send_message(draft("1", "1", at_cap), &users).is_ok());

        let over_cap = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(
            store.send_message(draft("1", "1", over_cap), &users),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn voice_join_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        store.join_voice_channel("c1", "u1").unwrap();
        store.join_voice_channel("c1", "u1").unwrap();
        store.join_voice_channel("c1", "u2").unwrap();
        assert_eq!(store.roster("c1"), vec!["u1", "u2"]);

        store.leave_voice_channel("c1", "u1").unwrap();
        store.leave_voice_channel("c1", "u1").unwrap();
        store.leave_voice_channel("never-joined", "u1").unwrap();
        assert_eq!(store.roster("c1"), vec!["u2"]);
    }

    #[test]
    fn roster_hydration_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path()).unwrap();

        let mut raw: BTreeMap<String, Vec<String>> = BTreeMap::new();
        raw.insert("c1".into(), vec!["u1".into(), "u1".into(), "u2".into()]);
        storage.write_slot(VOICE_ROSTERS_SLOT, &raw).unwrap();

        let store = ChannelStore::new(storage).unwrap();
        assert_eq!(store.roster("c1"), vec!["u1", "u2"]);
    }

    #[test]
    fn provisioning_runs_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        store.ensure_default_channels("fresh").unwrap();
        let lists = store.channel_lists("fresh");
        assert_eq!(lists.text.len(), 1);
        assert_eq!(lists.voice.len(), 1);
        assert_eq!(lists.text[0].name, "general");
        assert_eq!(lists.voice[0].name, "voice-chat");

        // A second observation adds nothing.
        store.ensure_default_channels("fresh").unwrap();
        assert_eq!(store.list_channels("fresh").len(), 2);

        // A server that already has channels is left alone.
        store.ensure_default_channels("1").unwrap();
        assert_eq!(store.list_channels("1").len(), 4);
    }

    #[test]
    fn state_round_trips_through_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let users = seed::seed_users();

        store
            .create_channel(NewChannel {
                server_id: "3".into(),
                name: "raids".into(),
                kind: ChannelKind::Text,
                private: false,
            })
            .unwrap();
        store.send_message(draft("5", "3", "ship it"), &users).unwrap();
        store.join_voice_channel("3", "u9").unwrap();

        let reloaded = open_store(&dir);
        assert_eq!(reloaded.channels(), store.channels());
        assert_eq!(reloaded.messages(), store.messages());
        assert_eq!(reloaded.rosters(), store.rosters());
    }
}
