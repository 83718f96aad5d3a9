//! Seed data written to storage on first run.
//!
//! These are the defaults the application ships with so a fresh profile is
//! not empty: a handful of servers, the channels for the first two, the
//! known users, the static friends list, and a short welcome conversation.

use chrono::{Duration, Utc};

use crate::models::{
    Channel, ChannelKind, Friend, Message, Server, User, UserSnapshot, UserStatus,
};

/// Default servers shown in the guild sidebar.
pub fn default_servers() -> Vec<Server> {
    vec![
        Server {
            id: "1".into(),
            name: "Verdant HQ".into(),
            icon: None,
            description: Some(
                "The official Verdant community server for developers and designers.".into(),
            ),
        },
        Server {
            id: "2".into(),
            name: "Design Team".into(),
            icon: None,
            description: Some(
                "Collaborative space for design discussions and creative workflows.".into(),
            ),
        },
        Server {
            id: "3".into(),
            name: "Gaming Squad".into(),
            icon: None,
            description: Some(
                "Gaming community for multiplayer sessions and tournament coordination.".into(),
            ),
        },
        Server {
            id: "4".into(),
            name: "Book Club".into(),
            icon: None,
            description: Some("Monthly book discussions and literary recommendations.".into()),
        },
    ]
}

/// Default channels for the seed servers.
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel {
            id: "1".into(),
            server_id: "1".into(),
            name: "general".into(),
            kind: ChannelKind::Text,
            private: false,
        },
        Channel {
            id: "2".into(),
            server_id: "1".into(),
            name: "announcements".into(),
            kind: ChannelKind::Text,
            private: true,
        },
        Channel {
            id: "3".into(),
            server_id: "1".into(),
            name: "voice-chat".into(),
            kind: ChannelKind::Voice,
            private: false,
        },
        Channel {
            id: "4".into(),
            server_id: "1".into(),
            name: "team-meeting".into(),
            kind: ChannelKind::Video,
            private: false,
        },
        Channel {
            id: "5".into(),
            server_id: "2".into(),
            name: "design-general".into(),
            kind: ChannelKind::Text,
            private: false,
        },
        Channel {
            id: "6".into(),
            server_id: "2".into(),
            name: "design-showcase".into(),
            kind: ChannelKind::Text,
            private: false,
        },
    ]
}

/// The known users, first entry being the default local identity.
pub fn seed_users() -> Vec<User> {
    let avatar = Some("/placeholder.svg?height=100&width=100".to_string());
    vec![
        User {
            id: "1".into(),
            username: "verdant_user".into(),
            discriminator: "0001".into(),
            email: None,
            avatar: avatar.clone(),
            bio: Some("Welcome to Verdant!".into()),
            status: UserStatus::Online,
            custom_status: None,
        },
        User {
            id: "2".into(),
            username: "alex".into(),
            discriminator: "1234".into(),
            email: None,
            avatar: avatar.clone(),
            bio: Some("Always ready for an adventure".into()),
            status: UserStatus::Online,
            custom_status: None,
        },
        User {
            id: "3".into(),
            username: "sarah".into(),
            discriminator: "5678".into(),
            email: None,
            avatar: avatar.clone(),
            bio: Some("Coffee lover and coder".into()),
            status: UserStatus::Idle,
            custom_status: None,
        },
        User {
            id: "4".into(),
            username: "michael".into(),
            discriminator: "9012".into(),
            email: None,
            avatar,
            bio: Some("Gaming enthusiast".into()),
            status: UserStatus::Dnd,
            custom_status: None,
        },
    ]
}

/// The static friends list used by the direct-message sidebar. The first
/// entry doubles as the fallback when no conversation has been tracked yet.
pub fn seed_friends() -> Vec<Friend> {
    vec![
        Friend {
            id: "1".into(),
            name: "Glitcher".into(),
            avatar: None,
            status: UserStatus::Online,
            activity: Some("Building something new".into()),
        },
        Friend {
            id: "2".into(),
            name: "Hex Puzzle Adventure".into(),
            avatar: None,
            status: UserStatus::Online,
            activity: Some("Solving puzzles".into()),
        },
        Friend {
            id: "3".into(),
            name: "Haruto".into(),
            avatar: None,
            status: UserStatus::Idle,
            activity: None,
        },
        Friend {
            id: "4".into(),
            name: "MSS | Assassin".into(),
            avatar: None,
            status: UserStatus::Dnd,
            activity: None,
        },
        Friend {
            id: "5".into(),
            name: "Franz".into(),
            avatar: None,
            status: UserStatus::Offline,
            activity: None,
        },
    ]
}

/// Welcome conversation in the #general channel of the first server,
/// already carrying the sender snapshots taken "at send time".
pub fn default_messages() -> Vec<Message> {
    let users = seed_users();
    let snapshot = |id: &str| -> Option<UserSnapshot> {
        users.iter().find(|u| u.id == id).map(UserSnapshot::from)
    };
    let now = Utc::now();

    vec![
        Message {
            id: "1".into(),
            channel_id: "1".into(),
            user_id: "2".into(),
            content: "Hey everyone! Welcome to Verdant HQ!".into(),
            timestamp: now - Duration::hours(24),
            user: snapshot("2"),
        },
        Message {
            id: "2".into(),
            channel_id: "1".into(),
            user_id: "3".into(),
            content: "Thanks for the invite! This UI looks amazing.".into(),
            timestamp: now - Duration::hours(12),
            user: snapshot("3"),
        },
        Message {
            id: "3".into(),
            channel_id: "1".into(),
            user_id: "4".into(),
            content: "I love the green theme! Very Matrix-like.".into(),
            timestamp: now - Duration::hours(2),
            user: snapshot("4"),
        },
        Message {
            id: "4".into(),
            channel_id: "1".into(),
            user_id: "1".into(),
            content: "Let's schedule a video call to discuss the new project.".into(),
            timestamp: now - Duration::hours(1),
            user: snapshot("1"),
        },
    ]
}
