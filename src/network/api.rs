use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Verdict value meaning "nothing to warn about".
pub const SAFE_VERDICT: &str = "SAFE";

/// Request body of `POST /api/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage<'a> {
    pub user: &'a str,
    pub message: &'a str,
}

/// Response body of `POST /api/messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "safetyAnalysis", default)]
    pub safety_analysis: Option<String>,
}

impl SubmitResponse {
    pub fn flagged(verdict: impl Into<String>) -> Self {
        Self {
            safety_analysis: Some(verdict.into()),
        }
    }

    /// The analysis text when it should be surfaced as a warning.
    pub fn warning(&self) -> Option<&str> {
        self.safety_analysis
            .as_deref()
            .filter(|verdict| !verdict.is_empty() && *verdict != SAFE_VERDICT)
    }
}

/// A message as listed by `GET /api/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteMessage {
    pub message: String,
    pub user: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Response body of `GET /api/messages?lastMessageId=N`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub messages: Vec<RemoteMessage>,
    #[serde(rename = "lastMessageId", default)]
    pub last_message_id: u64,
}

/// The remote message service. Safety analysis happens behind it.
#[async_trait]
pub trait MessageApi: Send + Sync {
    /// Lists messages strictly newer than `cursor`.
    async fn fetch_since(&self, cursor: u64) -> Result<FetchResponse, ApiError>;

    /// Stores a message and returns the service's safety verdict.
    async fn submit(&self, user: &str, text: &str) -> Result<SubmitResponse, ApiError>;

    /// Deletes the whole remote history.
    async fn clear(&self) -> Result<(), ApiError>;
}
