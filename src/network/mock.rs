//! Scripted in-memory `MessageApi` for tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::api::{FetchResponse, MessageApi, RemoteMessage, SubmitResponse};
use super::error::ApiError;

/// Lets a test park a fetch or submit mid-flight and release it later.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Replies with queued results in order; an empty queue answers with an
/// empty success.
#[derive(Default)]
pub struct ScriptedApi {
    fetches: Mutex<VecDeque<Result<FetchResponse, ApiError>>>,
    submits: Mutex<VecDeque<Result<SubmitResponse, ApiError>>>,
    clears: Mutex<VecDeque<Result<(), ApiError>>>,
    fetch_gate: Mutex<Option<Arc<Gate>>>,
    submit_gate: Mutex<Option<Arc<Gate>>>,
    fetch_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    clear_calls: AtomicUsize,
    cursors: Mutex<Vec<u64>>,
    submitted: Mutex<Vec<(String, String)>>,
}

impl ScriptedApi {
    pub fn push_fetch(&self, result: Result<FetchResponse, ApiError>) {
        self.fetches.lock().push_back(result);
    }

    pub fn push_submit(&self, result: Result<SubmitResponse, ApiError>) {
        self.submits.lock().push_back(result);
    }

    pub fn push_clear(&self, result: Result<(), ApiError>) {
        self.clears.lock().push_back(result);
    }

    /// Makes every following fetch wait on the returned gate.
    pub fn hold_fetches(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.fetch_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Makes every following submit wait on the returned gate.
    pub fn hold_submits(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.submit_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn cursors(&self) -> Vec<u64> {
        self.cursors.lock().clone()
    }

    pub fn submitted(&self) -> Vec<(String, String)> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl MessageApi for ScriptedApi {
    async fn fetch_since(&self, cursor: u64) -> Result<FetchResponse, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors.lock().push(cursor);

        let gate = self.fetch_gate.lock().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.fetches
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(FetchResponse::default()))
    }

    async fn submit(&self, user: &str, text: &str) -> Result<SubmitResponse, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted
            .lock()
            .push((user.to_string(), text.to_string()));

        let gate = self.submit_gate.lock().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.submits
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(SubmitResponse::default()))
    }

    async fn clear(&self) -> Result<(), ApiError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.clears.lock().pop_front().unwrap_or(Ok(()))
    }
}

pub fn remote(text: &str, user: &str, timestamp: i64) -> RemoteMessage {
    RemoteMessage {
        message: text.to_string(),
        user: user.to_string(),
        timestamp: Some(timestamp),
    }
}

pub fn page(messages: Vec<RemoteMessage>, last_message_id: u64) -> FetchResponse {
    FetchResponse {
        messages,
        last_message_id,
    }
}

pub fn decode_error() -> ApiError {
    ApiError::Decode(serde_json::from_str::<FetchResponse>("<html>").unwrap_err())
}

pub fn unavailable() -> ApiError {
    ApiError::Status { status: 503 }
}
