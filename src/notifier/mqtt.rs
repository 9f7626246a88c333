// notifier/mqtt.rs
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, error, info, warn};

use super::NotificationPublisher;
use crate::{config::MqttSettings, error::AppError, metrics};

const MAX_BACKOFF: Duration = Duration::from_secs(5);

pub struct MqttPublisher {
    client: AsyncClient,
    qos: QoS,
    retain: bool,
}

impl MqttPublisher {
    /// Connects to the broker and waits for its CONNACK, retrying with
    /// backoff until `connect_timeout_secs` runs out. The event loop is then
    /// driven by a background task for the life of the process.
    pub async fn connect(settings: &MqttSettings) -> Result<Self, AppError> {
        let qos = qos_from_level(settings.qos)?;
        if settings.client_id.trim().is_empty() {
            return Err(AppError::BrokerUnavailable("client id must not be empty".into()));
        }

        let mut options = MqttOptions::new(&settings.client_id, &settings.host, settings.port);
        options.set_keep_alive(Duration::from_secs(settings.keep_alive_secs));
        match (&settings.username, &settings.password) {
            (Some(username), Some(password)) => {
                options.set_credentials(username, password);
            }
            (None, None) => {}
            _ => {
                return Err(AppError::BrokerUnavailable(
                    "username and password must be set together".into(),
                ));
            }
        }

        let (client, mut event_loop) = AsyncClient::new(options, 64);

        wait_for_connack(
            &mut event_loop,
            Duration::from_secs(settings.connect_timeout_secs),
            Duration::from_millis(settings.reconnect_backoff_ms),
        )
        .await?;

        info!(
            host = %settings.host,
            port = settings.port,
            client_id = %settings.client_id,
            "Connected to MQTT broker"
        );

        tokio::spawn(drive_event_loop(event_loop));

        Ok(Self::with_client(client, qos, settings.retain))
    }

    fn with_client(client: AsyncClient, qos: QoS, retain: bool) -> Self {
        Self {
            client,
            qos,
            retain,
        }
    }
}

impl NotificationPublisher for MqttPublisher {
    /// Queues the message on the client without waiting. A full request
    /// queue (broker stalled or gone) drops the message.
    fn publish(&self, topic: String, payload: String) {
        match self
            .client
            .try_publish(topic.as_str(), self.qos, self.retain, payload)
        {
            Ok(()) => debug!(%topic, "Queued notification"),
            Err(e) => {
                ::metrics::counter!(metrics::NOTIFICATION_FAILURES).increment(1);
                let err = AppError::from(e);
                error!(%topic, error = %err, "Failed to publish notification");
            }
        }
    }
}

fn qos_from_level(level: u8) -> Result<QoS, AppError> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(AppError::BrokerUnavailable(format!("invalid qos level {other}"))),
    }
}

async fn wait_for_connack(
    event_loop: &mut EventLoop,
    window: Duration,
    initial_backoff: Duration,
) -> Result<(), AppError> {
    let deadline = Instant::now() + window;
    let mut backoff = initial_backoff;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(AppError::BrokerUnavailable(format!(
                "no CONNACK within {}s",
                window.as_secs()
            )));
        }

        match timeout(remaining, event_loop.poll()).await {
            Err(_) => continue,
            Ok(Ok(Event::Incoming(Packet::ConnAck(_)))) => return Ok(()),
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                warn!(error = %e, retry_in = ?backoff, "MQTT connect attempt failed");
                sleep(backoff.min(remaining)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }
}

async fn drive_event_loop(mut event_loop: EventLoop) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => info!("Reconnected to MQTT broker"),
            Ok(event) => debug!(?event, "MQTT event"),
            Err(e) => {
                error!(error = %e, "MQTT connection error");
                sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
