/// Application name
pub const APP_NAME: &str = "Verdant";

/// Maximum message length in characters (the composer's hard cap)
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Maximum number of tracked recent conversations
pub const MAX_RECENT_CONVERSATIONS: usize = 10;

/// Name of the text channel provisioned for a server with no channels
pub const DEFAULT_TEXT_CHANNEL: &str = "general";

/// Name of the voice channel provisioned for a server with no channels
pub const DEFAULT_VOICE_CHANNEL: &str = "voice-chat";

/// Discriminator assigned to the mock login identity
pub const LOGIN_DISCRIMINATOR: &str = "0001";

// Simulated latencies for the command layer, in milliseconds. These match
// the delays the UI was tuned against; they are cosmetic only.
pub const LOGIN_LATENCY_MS: u64 = 1000;
pub const SIGNUP_LATENCY_MS: u64 = 1000;
pub const LOGOUT_LATENCY_MS: u64 = 500;
pub const UPDATE_PROFILE_LATENCY_MS: u64 = 800;
pub const CREATE_SERVER_LATENCY_MS: u64 = 1000;
pub const JOIN_SERVER_LATENCY_MS: u64 = 1000;
pub const LEAVE_SERVER_LATENCY_MS: u64 = 500;
pub const CREATE_CHANNEL_LATENCY_MS: u64 = 800;
pub const DELETE_CHANNEL_LATENCY_MS: u64 = 500;
