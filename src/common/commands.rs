/// Commands the UI sends down to the sync task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// Raw input text; trimming and emptiness checks happen in the engine.
    Send(String),
    ClearHistory,
}
