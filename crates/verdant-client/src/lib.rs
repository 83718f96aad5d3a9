//! # verdant-client
//!
//! The application-level handle over the state stores: a shared
//! [`AppState`] plus a command layer the UI shell calls into. Commands
//! simulate the latency the interface was tuned against, then apply the
//! mutation synchronously, so overlapping calls never interleave their
//! persistence writes.

pub mod commands;
pub mod state;
pub mod voice;

use tracing_subscriber::{fmt, EnvFilter};

pub use state::{AppState, SharedState};
pub use voice::VoiceConnection;

/// Initialise the tracing subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("verdant_client=debug,verdant_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
