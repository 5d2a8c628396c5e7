use chrono::Utc;
use uuid::Uuid;

/// Author tag of messages typed by the local user.
pub const LOCAL_AUTHOR: &str = "User";
/// Author tag of locally synthesized notices.
pub const SYSTEM_AUTHOR: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Incoming,
    Outgoing,
}

impl Origin {
    pub fn for_author(author: &str) -> Self {
        if author == LOCAL_AUTHOR {
            Origin::Outgoing
        } else {
            Origin::Incoming
        }
    }
}

/// Exact `(text, author, timestamp)` triple used to suppress duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    text: String,
    author: String,
    timestamp: i64,
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub author: String,
    pub origin: Origin,
    pub is_system_notice: bool,
    /// Client-observed creation time in milliseconds since the epoch.
    pub timestamp: i64,
}

impl ChatMessage {
    /// Builds a message received from the message service.
    pub fn remote(text: String, author: String, timestamp: i64) -> Self {
        Self {
            id: format!("{author}-{timestamp}"),
            origin: Origin::for_author(&author),
            text,
            author,
            is_system_notice: false,
            timestamp,
        }
    }

    /// Builds an optimistic copy of something the local user just typed.
    pub fn outgoing(text: String) -> Self {
        Self {
            id: format!("local-{}", Uuid::new_v4()),
            text,
            author: LOCAL_AUTHOR.to_string(),
            origin: Origin::Outgoing,
            is_system_notice: false,
            timestamp: now_millis(),
        }
    }

    /// Builds a warning that only ever lives in the local transcript.
    pub fn system_notice(text: impl Into<String>) -> Self {
        Self {
            id: format!("notice-{}", Uuid::new_v4()),
            text: text.into(),
            author: SYSTEM_AUTHOR.to_string(),
            origin: Origin::Incoming,
            is_system_notice: true,
            timestamp: now_millis(),
        }
    }

    pub fn dedup_key(&self) -> MessageKey {
        MessageKey {
            text: self.text.clone(),
            author: self.author.clone(),
            timestamp: self.timestamp,
        }
    }

    pub fn is_incoming(&self) -> bool {
        self.origin == Origin::Incoming
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
