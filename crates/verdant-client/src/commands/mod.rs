//! The command layer: free async functions over [`crate::SharedState`],
//! one module per domain. Latency is slept *before* the lock is taken, so
//! the delay is purely cosmetic and mutations still apply one at a time.

pub mod channels;
pub mod identity;
pub mod messaging;
pub mod servers;
