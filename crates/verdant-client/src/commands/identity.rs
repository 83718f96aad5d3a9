//! Session commands: login, signup, logout, profile updates.

use std::time::Duration;

use tokio::time::sleep;

use verdant_shared::constants::{
    LOGIN_LATENCY_MS, LOGOUT_LATENCY_MS, SIGNUP_LATENCY_MS, UPDATE_PROFILE_LATENCY_MS,
};
use verdant_shared::models::User;
use verdant_store::{ProfileUpdate, Result};

use crate::state::{lock, SharedState};

pub async fn login(state: &SharedState, email: &str, password: &str) -> Result<User> {
    sleep(Duration::from_millis(LOGIN_LATENCY_MS)).await;
    lock(state).session.login(email, password)
}

pub async fn signup(
    state: &SharedState,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    sleep(Duration::from_millis(SIGNUP_LATENCY_MS)).await;
    lock(state).session.signup(username, email, password)
}

pub async fn logout(state: &SharedState) -> Result<()> {
    sleep(Duration::from_millis(LOGOUT_LATENCY_MS)).await;
    lock(state).session.logout()
}

pub async fn update_profile(state: &SharedState, update: ProfileUpdate) -> Result<User> {
    sleep(Duration::from_millis(UPDATE_PROFILE_LATENCY_MS)).await;
    lock(state).session.update_profile(update)
}

/// The active identity, if any.
pub fn current_user(state: &SharedState) -> Option<User> {
    lock(state).session.current_user().cloned()
}
