//! Application state shared across all commands.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` and handed to the
//! UI shell; every command locks it, mutates, and releases. The stores
//! write through to disk on each mutation, so the in-memory state is never
//! ahead of the persisted one for longer than a single call.

use std::sync::{Arc, Mutex, MutexGuard};

use verdant_store::{
    ChannelStore, RecencyTracker, Result, ServerDirectory, SessionStore, Storage,
};

/// Central application state: the four stores over one storage root.
pub struct AppState {
    pub session: SessionStore,
    pub servers: ServerDirectory,
    pub channels: ChannelStore,
    pub recents: RecencyTracker,
}

/// The shared handle commands operate on.
pub type SharedState = Arc<Mutex<AppState>>;

impl AppState {
    /// Open the default platform storage directory and hydrate all stores.
    pub fn new() -> Result<Self> {
        Self::with_storage(Storage::new()?)
    }

    /// Hydrate all stores from an explicit storage handle (tests, custom
    /// layouts).
    pub fn with_storage(storage: Storage) -> Result<Self> {
        Ok(Self {
            session: SessionStore::new(storage.clone()),
            servers: ServerDirectory::new(storage.clone())?,
            channels: ChannelStore::new(storage.clone())?,
            recents: RecencyTracker::new(storage),
        })
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }
}

/// Lock the shared state, recovering from poisoning: a poisoned lock only
/// means a previous caller panicked mid-command, and every committed
/// mutation is already persisted write-through.
pub(crate) fn lock(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
