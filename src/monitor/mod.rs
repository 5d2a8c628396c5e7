//! Headless safety monitor.
//!
//! Submits each line the user commits to the message service under a
//! dedicated author tag and raises an alert when the verdict is not safe.

pub mod alert;

use std::time::{Duration, Instant};

use crate::network::MessageApi;

pub use alert::{Alert, AlertSlot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// Blank input or the same text as last time.
    Ignored,
    Safe,
    Flagged(String),
    Failed,
}

pub struct SafetyMonitor<A> {
    api: A,
    author: String,
    last_processed: Option<String>,
    alerts: AlertSlot,
}

impl<A: MessageApi> SafetyMonitor<A> {
    pub fn new(api: A, author: impl Into<String>, alert_ttl: Duration) -> Self {
        Self {
            api,
            author: author.into(),
            last_processed: None,
            alerts: AlertSlot::new(alert_ttl),
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Analyzes one committed input. Repeats of the previous raw text are
    /// skipped; errors are logged and never raise an alert.
    pub async fn analyze(&mut self, raw: &str) -> MonitorOutcome {
        let text = raw.trim();
        if text.is_empty() || self.last_processed.as_deref() == Some(raw) {
            return MonitorOutcome::Ignored;
        }
        self.last_processed = Some(raw.to_string());
        log::info!("Analyzing text ({} chars)", text.chars().count());

        match self.api.submit(&self.author, text).await {
            Ok(response) => match response.warning() {
                Some(warning) => {
                    self.alerts.show(warning, Instant::now());
                    MonitorOutcome::Flagged(warning.to_string())
                }
                None => MonitorOutcome::Safe,
            },
            Err(err) => {
                log::error!("Error analyzing text: {err}");
                MonitorOutcome::Failed
            }
        }
    }

    pub fn current_alert(&mut self) -> Option<&Alert> {
        self.alerts.current(Instant::now())
    }
}
