use std::time::{Duration, Instant};

use crate::common::{ChatMessage, OpState, SyncEvent};
use crate::monitor::{Alert, AlertSlot};

/// Local UI state; the transcript mirrors the sync engine through events.
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    send_state: OpState,
    banner: AlertSlot,
}

impl AppState {
    pub fn new(banner_ttl: Duration) -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            send_state: OpState::Idle,
            banner: AlertSlot::new(banner_ttl),
        }
    }

    pub fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Appended(message) => {
                if message.is_system_notice {
                    self.banner.show(message.text.clone(), Instant::now());
                }
                self.messages.push(message);
            }
            SyncEvent::Cleared => {
                self.messages.clear();
                self.banner.dismiss();
            }
            SyncEvent::SendState(state) => self.send_state = state,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.send_state == OpState::Pending
    }

    /// Takes the input box contents when they hold more than whitespace.
    pub fn take_input(&mut self) -> Option<String> {
        if self.input_text.trim().is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.input_text))
    }

    pub fn banner(&mut self) -> Option<&Alert> {
        self.banner.current(Instant::now())
    }

    pub fn dismiss_banner(&mut self) {
        self.banner.dismiss();
    }
}
