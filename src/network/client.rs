use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::common::SyncCommand;
use crate::sync::{MessageSyncEngine, SendOutcome};

use super::MessageApi;

/// Background task driving a `MessageSyncEngine`: a fixed-period poll timer
/// plus the commands coming from the UI.
pub struct SyncClient<A> {
    engine: Arc<MessageSyncEngine<A>>,
    command_receiver: mpsc::Receiver<SyncCommand>,
    poll_interval: Duration,
}

impl<A: MessageApi + 'static> SyncClient<A> {
    pub fn new(
        engine: Arc<MessageSyncEngine<A>>,
        command_receiver: mpsc::Receiver<SyncCommand>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            engine,
            command_receiver,
            poll_interval,
        }
    }

    /// Runs until the command channel closes.
    pub async fn run(mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        log::info!(
            "Sync loop started (poll every {} ms)",
            self.poll_interval.as_millis()
        );

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    // A slow fetch absorbs later ticks through the engine's guard.
                    let engine = Arc::clone(&self.engine);
                    tokio::spawn(async move {
                        engine.poll().await;
                    });
                }
            }
        }

        log::info!("Sync loop stopped");
        Ok(())
    }

    fn handle_command(&self, command: SyncCommand) {
        let engine = Arc::clone(&self.engine);
        match command {
            SyncCommand::Send(text) => {
                tokio::spawn(async move {
                    if let SendOutcome::Rejected(reason) = engine.send(&text).await {
                        log::debug!("Send rejected: {reason:?}");
                    }
                });
            }
            SyncCommand::ClearHistory => {
                tokio::spawn(async move {
                    engine.clear_history().await;
                });
            }
        }
    }
}
