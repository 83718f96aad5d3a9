//! Channel lifecycle commands.

use std::time::Duration;

use tokio::time::sleep;

use verdant_shared::constants::{CREATE_CHANNEL_LATENCY_MS, DELETE_CHANNEL_LATENCY_MS};
use verdant_shared::models::Channel;
use verdant_store::{ChannelLists, NewChannel, Result};

use crate::state::{lock, SharedState};

/// A server's channels split by kind. Listing counts as an observation of
/// the server, so a server with no channels gets its defaults here too.
pub fn list_channels(state: &SharedState, server_id: &str) -> Result<ChannelLists> {
    let mut app = lock(state);
    app.channels.ensure_default_channels(server_id)?;
    Ok(app.channels.channel_lists(server_id))
}

pub async fn create_channel(state: &SharedState, new: NewChannel) -> Result<Channel> {
    sleep(Duration::from_millis(CREATE_CHANNEL_LATENCY_MS)).await;
    lock(state).channels.create_channel(new)
}

pub async fn delete_channel(state: &SharedState, id: &str) -> Result<()> {
    sleep(Duration::from_millis(DELETE_CHANNEL_LATENCY_MS)).await;
    lock(state).channels.delete_channel(id)
}

pub fn select_channel(state: &SharedState, id: Option<&str>) -> Result<()> {
    lock(state).channels.select_channel(id)
}

pub fn current_channel(state: &SharedState) -> Option<Channel> {
    lock(state).channels.current_channel().cloned()
}
