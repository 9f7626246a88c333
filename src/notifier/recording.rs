// notifier/recording.rs
use std::sync::Mutex;

use tracing::error;

use super::NotificationPublisher;

/// Captures notifications instead of sending them. A failing recorder drops
/// every message and only logs, like a broker outage.
#[derive(Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<(String, String)>>,
    failing: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationPublisher for RecordingPublisher {
    fn publish(&self, topic: String, payload: String) {
        if self.failing {
            error!(%topic, error = "broker unreachable", "Failed to publish notification");
            return;
        }
        self.sent.lock().unwrap().push((topic, payload));
    }
}
