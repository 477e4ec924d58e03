use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::NotificationConfig;
use crate::core::ActivitySummary;

/// Desktop notification sender with cooldown to prevent spam.
pub struct Notifier {
    enabled: bool,
    cooldown: Duration,
    last_sent: Mutex<Option<Instant>>,
}

impl Notifier {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            enabled: config.enabled,
            cooldown: Duration::from_secs(config.cooldown_seconds),
            last_sent: Mutex::new(None),
        }
    }

    /// Try to send a desktop notification for a flagged address summary.
    /// Returns true if a notification was sent, false if skipped.
    pub fn notify(&self, summary: &ActivitySummary) -> bool {
        if !self.enabled {
            return false;
        }
        if !summary.flagged() {
            return false;
        }
        if !self.check_cooldown() {
            return false;
        }

        self.send_notification(summary);
        true
    }

    /// Check and update cooldown. Returns true if enough time has passed.
    fn check_cooldown(&self) -> bool {
        let mut last = self.last_sent.lock().unwrap();
        let now = Instant::now();
        if let Some(prev) = *last {
            if now.duration_since(prev) < self.cooldown {
                return false;
            }
        }
        *last = Some(now);
        true
    }

    /// Fire-and-forget: send the actual desktop notification.
    fn send_notification(&self, summary: &ActivitySummary) {
        let title = format!("🕵️ ChainWatch — {} address flagged", summary.chain);
        let reason = if summary.reported_as_scam {
            "on the reported scam list"
        } else {
            "suspicious behavioral pattern"
        };
        let addr_short = &summary.address[..16.min(summary.address.len())];
        let body = format!("{addr_short}… | {reason}");

        // Fire-and-forget in a background thread to never block the scan loop
        std::thread::spawn(move || {
            if let Err(e) = notify_rust::Notification::new()
                .summary(&title)
                .body(&body)
                .show()
            {
                tracing::debug!("Desktop notification failed: {e}");
            }
        });
    }
}
