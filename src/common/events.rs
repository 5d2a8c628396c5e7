use super::types::ChatMessage;

/// In-flight state of one kind of remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpState {
    #[default]
    Idle,
    Pending,
}

/// Events the sync task publishes to the UI, in mutation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Appended(ChatMessage),
    Cleared,
    SendState(OpState),
}
