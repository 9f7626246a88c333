// notifier/mod.rs
mod mqtt;
#[cfg(test)]
pub mod recording;

pub use mqtt::MqttPublisher;

/// Best-effort delivery of device notifications. `publish` hands the message
/// off and returns immediately; delivery failures are logged by the
/// implementation and never reach the caller.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, topic: String, payload: String);
}
