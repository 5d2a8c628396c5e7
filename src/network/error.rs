use thiserror::Error;

/// Failures talking to the message service.
///
/// `Transport` and `Status` are both transport failures (unreachable service,
/// non-2xx reply); `Decode` covers malformed response bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
