use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::api::{FetchResponse, MessageApi, OutgoingMessage, SubmitResponse};
use super::error::ApiError;

/// `MessageApi` over HTTP/JSON.
///
/// No per-request deadline is configured; a call runs until the transport
/// resolves or fails.
pub struct HttpMessageApi {
    client: Client,
    base_url: String,
}

impl HttpMessageApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/api/messages", self.base_url)
    }

    fn clear_url(&self) -> String {
        format!("{}/api/messages/clear", self.base_url)
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = ensure_success(response)?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl MessageApi for HttpMessageApi {
    async fn fetch_since(&self, cursor: u64) -> Result<FetchResponse, ApiError> {
        let url = self.messages_url();
        log::debug!("GET {url}?lastMessageId={cursor}");

        let response = self
            .client
            .get(&url)
            .query(&[("lastMessageId", cursor)])
            .send()
            .await?;
        decode(response).await
    }

    async fn submit(&self, user: &str, text: &str) -> Result<SubmitResponse, ApiError> {
        let url = self.messages_url();
        log::debug!("POST {url} as {user}");

        let response = self
            .client
            .post(&url)
            .json(&OutgoingMessage {
                user,
                message: text,
            })
            .send()
            .await?;
        decode(response).await
    }

    async fn clear(&self) -> Result<(), ApiError> {
        let url = self.clear_url();
        log::debug!("DELETE {url}");

        let response = self.client.delete(&url).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}
