pub mod commands;
pub mod events;
pub mod types;

pub use commands::SyncCommand;
pub use events::{OpState, SyncEvent};
pub use types::{ChatMessage, MessageKey};
