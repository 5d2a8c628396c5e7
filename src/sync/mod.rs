pub mod dedup;
pub mod engine;

pub use engine::{MessageSyncEngine, SendOutcome};
