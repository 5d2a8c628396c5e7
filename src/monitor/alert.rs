use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub shown_at: Instant,
}

/// Holds at most one alert; a new alert replaces the current one.
#[derive(Debug)]
pub struct AlertSlot {
    current: Option<Alert>,
    ttl: Duration,
}

impl AlertSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> &Alert {
        if let Some(previous) = &self.current {
            log::debug!("Replacing alert {:?}", previous.message);
        }
        self.current.insert(Alert {
            message: message.into(),
            shown_at: now,
        })
    }

    /// The alert still visible at `now`, dropping it once expired.
    pub fn current(&mut self, now: Instant) -> Option<&Alert> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|alert| now.saturating_duration_since(alert.shown_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Alert> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_expires_after_ttl() {
        let start = Instant::now();
        let mut slot = AlertSlot::new(Duration::from_secs(5));
        slot.show("TOXIC", start);

        assert!(slot.current(start + Duration::from_secs(4)).is_some());
        assert!(slot.current(start + Duration::from_secs(5)).is_none());
        assert!(slot.current(start).is_none());
    }

    #[test]
    fn new_alert_replaces_current() {
        let start = Instant::now();
        let mut slot = AlertSlot::new(Duration::from_secs(5));
        slot.show("first", start);
        slot.show("second", start + Duration::from_secs(3));

        let alert = slot.current(start + Duration::from_secs(6)).unwrap();
        assert_eq!(alert.message, "second");
    }

    #[test]
    fn dismiss_clears_slot() {
        let now = Instant::now();
        let mut slot = AlertSlot::new(Duration::from_secs(5));
        slot.show("TOXIC", now);

        assert_eq!(slot.dismiss().map(|a| a.message), Some("TOXIC".to_string()));
        assert!(slot.current(now).is_none());
    }
}
