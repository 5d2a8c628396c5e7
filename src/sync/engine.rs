use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::common::types::{LOCAL_AUTHOR, now_millis};
use crate::common::{ChatMessage, OpState, SyncEvent};
use crate::network::MessageApi;

use super::dedup::DedupCache;

pub const FETCH_FAILED_NOTICE: &str = "Failed to fetch messages. Please try again.";
pub const SEND_FAILED_NOTICE: &str = "Failed to send message. Please try again.";
pub const CLEAR_FAILED_NOTICE: &str = "Failed to clear history on server. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A previous fetch was still running; this tick did nothing.
    Skipped,
    Synced { appended: usize },
    /// History was cleared while the fetch was in flight; its result was dropped.
    Discarded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejection {
    Empty,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Rejected(SendRejection),
    Delivered { warning: Option<String> },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    RemoteFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Fetch,
    Send,
}

struct SyncState {
    messages: Vec<ChatMessage>,
    cursor: u64,
    dedup: DedupCache,
    fetch: OpState,
    send: OpState,
    /// Bumped by every history clear.
    epoch: u64,
    events: Option<mpsc::UnboundedSender<SyncEvent>>,
}

impl SyncState {
    fn slot(&mut self, kind: OpKind) -> &mut OpState {
        match kind {
            OpKind::Fetch => &mut self.fetch,
            OpKind::Send => &mut self.send,
        }
    }

    fn set_op(&mut self, kind: OpKind, next: OpState) {
        *self.slot(kind) = next;
        if kind == OpKind::Send {
            self.emit(SyncEvent::SendState(next));
        }
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                log::debug!("Sync event receiver dropped");
            }
        }
    }

    /// Appends `message` unless its key was already seen.
    fn append_unique(&mut self, message: ChatMessage) -> bool {
        if !self.dedup.insert(message.dedup_key()) {
            log::debug!("Dropping duplicate message {}", message.id);
            return false;
        }
        self.push(message);
        true
    }

    /// Notices are local-only and each carries a fresh id, so they skip dedup.
    fn append_notice(&mut self, text: &str) {
        self.push(ChatMessage::system_notice(text));
    }

    fn push(&mut self, message: ChatMessage) {
        self.emit(SyncEvent::Appended(message.clone()));
        self.messages.push(message);
    }

    fn advance_cursor(&mut self, remote: u64) {
        if remote < self.cursor {
            log::warn!(
                "Service moved cursor backwards ({} -> {remote}); keeping {}",
                self.cursor,
                self.cursor
            );
            return;
        }
        self.cursor = remote;
    }

    fn reset(&mut self) {
        self.messages.clear();
        self.cursor = 0;
        self.dedup.clear();
        self.epoch += 1;
        self.emit(SyncEvent::Cleared);
    }
}

/// Marks one operation kind Pending until dropped, on every exit path.
struct InFlight<'a> {
    state: &'a Mutex<SyncState>,
    kind: OpKind,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().set_op(self.kind, OpState::Idle);
    }
}

/// Owns the local transcript and keeps it in step with the message service.
///
/// All methods take `&self`; state lives behind a mutex that is never held
/// across a remote call, so the engine can be shared between the polling
/// timer and UI command handlers through an `Arc`.
pub struct MessageSyncEngine<A> {
    api: A,
    state: Mutex<SyncState>,
}

impl<A: MessageApi> MessageSyncEngine<A> {
    pub fn new(api: A, dedup_capacity: Option<usize>) -> Self {
        Self {
            api,
            state: Mutex::new(SyncState {
                messages: Vec::new(),
                cursor: 0,
                dedup: DedupCache::new(dedup_capacity),
                fetch: OpState::Idle,
                send: OpState::Idle,
                epoch: 0,
                events: None,
            }),
        }
    }

    /// Publishes every transcript mutation to `events`.
    pub fn with_events(self, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        self.state.lock().events = Some(events);
        self
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    fn begin(&self, kind: OpKind) -> Option<InFlight<'_>> {
        let mut state = self.state.lock();
        if *state.slot(kind) == OpState::Pending {
            return None;
        }
        state.set_op(kind, OpState::Pending);
        Some(InFlight {
            state: &self.state,
            kind,
        })
    }

    /// Fetches messages newer than the cursor and appends the unseen ones.
    pub async fn poll(&self) -> PollOutcome {
        let Some(_in_flight) = self.begin(OpKind::Fetch) else {
            log::debug!("Fetch still in flight; skipping tick");
            return PollOutcome::Skipped;
        };

        let (cursor, epoch) = {
            let state = self.state.lock();
            (state.cursor, state.epoch)
        };

        match self.api.fetch_since(cursor).await {
            Ok(response) => {
                let mut state = self.state.lock();
                if state.epoch != epoch {
                    log::info!(
                        "History cleared during fetch; dropping {} messages",
                        response.messages.len()
                    );
                    return PollOutcome::Discarded;
                }

                let mut appended = 0;
                for remote in response.messages {
                    let timestamp = remote.timestamp.unwrap_or_else(now_millis);
                    let message = ChatMessage::remote(remote.message, remote.user, timestamp);
                    if state.append_unique(message) {
                        appended += 1;
                    }
                }

                if appended > 0 {
                    state.advance_cursor(response.last_message_id);
                    log::debug!("Appended {appended} messages; cursor at {}", state.cursor);
                }
                PollOutcome::Synced { appended }
            }
            Err(err) => {
                log::error!("Error fetching messages: {err}");
                self.state.lock().append_notice(FETCH_FAILED_NOTICE);
                PollOutcome::Failed
            }
        }
    }

    /// Shows `text` optimistically, then submits it for analysis.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Rejected(SendRejection::Empty);
        }

        let Some(_in_flight) = self.begin(OpKind::Send) else {
            log::debug!("Send already in flight; rejecting");
            return SendOutcome::Rejected(SendRejection::InFlight);
        };

        self.state
            .lock()
            .append_unique(ChatMessage::outgoing(text.to_string()));

        match self.api.submit(LOCAL_AUTHOR, text).await {
            Ok(response) => {
                let warning = response.warning().map(str::to_string);
                if let Some(warning) = &warning {
                    log::warn!("Message flagged by safety analysis: {warning}");
                    self.state.lock().append_notice(warning);
                }
                SendOutcome::Delivered { warning }
            }
            Err(err) => {
                // The optimistic copy stays visible.
                log::error!("Error sending message: {err}");
                self.state.lock().append_notice(SEND_FAILED_NOTICE);
                SendOutcome::Failed
            }
        }
    }

    /// Empties the local transcript, then asks the service to do the same.
    pub async fn clear_history(&self) -> ClearOutcome {
        self.state.lock().reset();

        match self.api.clear().await {
            Ok(()) => ClearOutcome::Cleared,
            Err(err) => {
                // Local history stays cleared.
                log::error!("Error clearing chat history: {err}");
                self.state.lock().append_notice(CLEAR_FAILED_NOTICE);
                ClearOutcome::RemoteFailed
            }
        }
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.state.lock().messages.clone()
    }

    pub fn cursor(&self) -> u64 {
        self.state.lock().cursor
    }

    #[cfg(test)]
    pub fn fetch_state(&self) -> OpState {
        self.state.lock().fetch
    }

    #[cfg(test)]
    pub fn send_state(&self) -> OpState {
        self.state.lock().send
    }

    #[cfg(test)]
    pub fn dedup_len(&self) -> usize {
        self.state.lock().dedup.len()
    }
}
