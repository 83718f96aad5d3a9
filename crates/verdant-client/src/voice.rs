//! Voice-channel connection lifecycle.
//!
//! [`VoiceConnection`] ties roster membership to a value the UI context
//! owns: connecting joins the roster, and dropping the guard leaves it, so
//! navigating away while connected can never strand a membership.

use verdant_store::Result;

use crate::state::{lock, SharedState};

/// RAII guard for a voice/video channel membership.
pub struct VoiceConnection {
    state: SharedState,
    channel_id: String,
    user_id: String,
    connected: bool,
}

impl VoiceConnection {
    /// Join `user_id` into the channel's roster. Joining a channel the
    /// user is already in succeeds and changes nothing.
    pub fn connect(state: &SharedState, channel_id: &str, user_id: &str) -> Result<Self> {
        lock(state)
            .channels
            .join_voice_channel(channel_id, user_id)?;
        Ok(Self {
            state: SharedState::clone(state),
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            connected: true,
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Leave the channel explicitly. Dropping the guard afterwards is a
    /// no-op.
    pub fn disconnect(mut self) -> Result<()> {
        self.leave()
    }

    fn leave(&mut self) -> Result<()> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;
        lock(&self.state)
            .channels
            .leave_voice_channel(&self.channel_id, &self.user_id)
    }
}

impl Drop for VoiceConnection {
    fn drop(&mut self) {
        if let Err(error) = self.leave() {
            tracing::warn!(channel_id = %self.channel_id, %error, "failed to leave voice channel on teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use verdant_store::Storage;

    fn shared_state(dir: &tempfile::TempDir) -> SharedState {
        AppState::with_storage(Storage::open_at(dir.path()).unwrap())
            .unwrap()
            .into_shared()
    }

    #[test]
    fn dropping_the_guard_leaves_the_roster() {
        let dir = tempfile::tempdir().unwrap();
        let state = shared_state(&dir);

        {
            let _conn = VoiceConnection::connect(&state, "3", "u1").unwrap();
            assert_eq!(lock(&state).channels.roster("3"), vec!["u1"]);
        }
        assert!(lock(&state).channels.roster("3").is_empty());
    }

    #[test]
    fn explicit_disconnect_then_drop_is_safe() {
        let dir = tempfile::tempdir().unwrap();
        let state = shared_state(&dir);

        let conn = VoiceConnection::connect(&state, "3", "u1").unwrap();
        conn.disconnect().unwrap();
        assert!(lock(&state).channels.roster("3").is_empty());
    }

    #[test]
    fn two_guards_track_two_users() {
        let dir = tempfile::tempdir().unwrap();
        let state = shared_state(&dir);

        let _a = VoiceConnection::connect(&state, "3", "u1").unwrap();
        let b = VoiceConnection::connect(&state, "3", "u2").unwrap();
        assert_eq!(lock(&state).channels.roster("3"), vec!["u1", "u2"]);

        drop(b);
        assert_eq!(lock(&state).channels.roster("3"), vec!["u1"]);
    }
}
