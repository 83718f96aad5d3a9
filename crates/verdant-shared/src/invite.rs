//! Server invite codes.
//!
//! An invite is a small JSON payload encoded as base64url, copiable as a
//! single string. There is no signature or secret: the application has no
//! real backend, so a code only needs to be well-formed to be accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvitePayload {
    pub server_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InviteToken {
    pub payload: InvitePayload,
}

impl InviteToken {
    /// Create an invite for a server.
    pub fn create(server_name: impl Into<String>, server_icon: Option<String>) -> Self {
        Self {
            payload: InvitePayload {
                server_name: server_name.into(),
                server_icon,
                created_at: Utc::now(),
            },
        }
    }

    /// Encode the token as a base64url string (copiable code).
    pub fn encode(&self) -> String {
        // Serialization of a plain payload struct cannot fail.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        base64_url_encode(&bytes)
    }

    /// Decode a base64url string back into an `InviteToken`.
    ///
    /// Empty codes are rejected up front so the caller gets a distinct
    /// error for a blank input field.
    pub fn decode(code: &str) -> Result<Self, InviteError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(InviteError::Empty);
        }
        let bytes = base64_url_decode(code)?;
        serde_json::from_slice(&bytes).map_err(|_| InviteError::InvalidFormat)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Invite code is empty")]
    Empty,

    #[error("Invalid invite format")]
    InvalidFormat,

    #[error("Base64 decode error")]
    Base64Decode,
}

fn base64_url_encode(data: &[u8]) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    URL_SAFE_NO_PAD.encode(data)
}

fn base64_url_decode(s: &str) -> Result<Vec<u8>, InviteError> {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|_| InviteError::Base64Decode)
}
