//! The session store: the authenticated (mock) identity.
//!
//! Login and signup fabricate an identity client-side; there is no backend
//! to validate against. Every successful mutation writes the full identity
//! snapshot through to its slot, and a failed mutation leaves both memory
//! and slot untouched.

use rand::Rng;
use uuid::Uuid;

use verdant_shared::constants::LOGIN_DISCRIMINATOR;
use verdant_shared::models::{User, UserStatus};
use verdant_shared::seed;

use crate::error::{Result, StoreError};
use crate::storage::Storage;

const IDENTITY_SLOT: &str = "verdant_user";

const SIGNUP_AVATAR: &str = "/placeholder.svg?height=200&width=200";

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub status: Option<UserStatus>,
    pub custom_status: Option<String>,
}

pub struct SessionStore {
    storage: Storage,
    identity: Option<User>,
    seed_users: Vec<User>,
}

impl SessionStore {
    /// Hydrate the identity from its slot, if one was persisted.
    pub fn new(storage: Storage) -> Self {
        let identity = storage.read_slot(IDENTITY_SLOT);
        Self {
            storage,
            identity,
            seed_users: seed::seed_users(),
        }
    }

    /// The active identity, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The known users with the authenticated identity merged in: it
    /// replaces a seed user with the same id, otherwise it is appended.
    pub fn users(&self) -> Vec<User> {
        let mut users = self.seed_users.clone();
        if let Some(current) = &self.identity {
            match users.iter_mut().find(|u| u.id == current.id) {
                Some(slot) => *slot = current.clone(),
                None => users.push(current.clone()),
            }
        }
        users
    }

    /// Log in with mock credentials. Any non-empty email/password pair is
    /// accepted; the username is the email's local part.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::Validation(
                "email and password are required".into(),
            ));
        }

        let username = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: "1".into(),
            username,
            discriminator: LOGIN_DISCRIMINATOR.into(),
            email: Some(email.to_string()),
            avatar: Some(SIGNUP_AVATAR.into()),
            bio: None,
            status: UserStatus::Online,
            custom_status: None,
        };

        self.storage.write_slot(IDENTITY_SLOT, &user)?;
        self.identity = Some(user.clone());
        tracing::info!(user_id = %user.id, username = %user.username, "logged in");
        Ok(user)
    }

    /// Create a fresh identity with a random four-digit discriminator.
    pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(StoreError::Validation(
                "username, email and password are required".into(),
            ));
        }

        let discriminator = rand::thread_rng().gen_range(1000..10000).to_string();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            discriminator,
            email: Some(email.to_string()),
            avatar: Some(SIGNUP_AVATAR.into()),
            bio: None,
            status: UserStatus::Online,
            custom_status: None,
        };

        self.storage.write_slot(IDENTITY_SLOT, &user)?;
        self.identity = Some(user.clone());
        tracing::info!(user_id = %user.id, username = %user.username, "signed up");
        Ok(user)
    }

    /// Clear the identity and its slot.
    pub fn logout(&mut self) -> Result<()> {
        self.storage.clear_slot(IDENTITY_SLOT)?;
        self.identity = None;
        tracing::info!("logged out");
        Ok(())
    }

    /// Merge a partial update into the active identity and persist the
    /// full snapshot. Fails with [`StoreError::Unauthenticated`] when no
    /// identity is active.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<User> {
        let current = self.identity.as_ref().ok_or(StoreError::Unauthenticated)?;

        let mut updated = current.clone();
        if let Some(username) = update.username {
            updated.username = username;
        }
        if let Some(avatar) = update.avatar {
            updated.avatar = Some(avatar);
        }
        if let Some(bio) = update.bio {
            updated.bio = Some(bio);
        }
        if let Some(status) = update.status {
            updated.status = status;
        }
        if let Some(custom_status) = update.custom_status {
            updated.custom_status = Some(custom_status);
        }

        self.storage.write_slot(IDENTITY_SLOT, &updated)?;
        self.identity = Some(updated.clone());
        tracing::info!(user_id = %updated.id, "profile updated");
        Ok(updated)
    }
}
