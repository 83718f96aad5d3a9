//! # verdant-shared
//!
//! Domain models, product constants, invite tokens and seed data shared by
//! the Verdant state core. This crate is pure data: no I/O, no persistence.

pub mod constants;
pub mod invite;
pub mod models;
pub mod seed;

pub use invite::{InviteError, InviteToken};
pub use models::*;
