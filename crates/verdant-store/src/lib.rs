//! # verdant-store
//!
//! The client-side state model behind the Verdant UI: session identity,
//! server directory, channels/messages/voice rosters, and the
//! direct-message recency tracker.
//!
//! Each store keeps its working state in memory and writes through to a
//! named slot of the local key-value [`Storage`] on every successful
//! mutation, so a reload reconstructs identical state. Mutations are
//! synchronous; the command layer in `verdant-client` adds the cosmetic
//! latency the UI expects.

pub mod channels;
pub mod recents;
pub mod servers;
pub mod session;
pub mod storage;

mod error;

pub use channels::{ChannelLists, ChannelStore, MessageDraft, NewChannel};
pub use error::{Result, StoreError};
pub use recents::RecencyTracker;
pub use servers::ServerDirectory;
pub use session::{ProfileUpdate, SessionStore};
pub use storage::Storage;
