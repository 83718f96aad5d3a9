//! Server directory commands.

use std::time::Duration;

use tokio::time::sleep;

use verdant_shared::constants::{
    CREATE_SERVER_LATENCY_MS, JOIN_SERVER_LATENCY_MS, LEAVE_SERVER_LATENCY_MS,
};
use verdant_shared::models::Server;
use verdant_store::Result;

use crate::state::{lock, SharedState};

pub fn list_servers(state: &SharedState) -> Vec<Server> {
    lock(state).servers.servers().to_vec()
}

pub async fn create_server(
    state: &SharedState,
    name: &str,
    description: Option<String>,
    icon: Option<String>,
) -> Result<Server> {
    sleep(Duration::from_millis(CREATE_SERVER_LATENCY_MS)).await;
    lock(state).servers.create_server(name, description, icon)
}

pub async fn join_server(state: &SharedState, code: &str) -> Result<Server> {
    sleep(Duration::from_millis(JOIN_SERVER_LATENCY_MS)).await;
    lock(state).servers.join_server(code)
}

pub async fn leave_server(state: &SharedState, id: &str) -> Result<()> {
    sleep(Duration::from_millis(LEAVE_SERVER_LATENCY_MS)).await;
    lock(state).servers.leave_server(id)
}

/// Select a server (or none for the direct-message view) and let the
/// channel store observe it, provisioning default channels if the server
/// has none. Unknown ids fail with `NotFound`; the caller redirects to the
/// default view in that case.
pub fn select_server(state: &SharedState, id: Option<&str>) -> Result<()> {
    let mut app = lock(state);
    app.servers.select_server(id)?;
    if let Some(id) = app.servers.current_server_id().map(String::from) {
        app.channels.ensure_default_channels(&id)?;
    }
    Ok(())
}

pub fn current_server(state: &SharedState) -> Option<Server> {
    lock(state).servers.current_server().cloned()
}
