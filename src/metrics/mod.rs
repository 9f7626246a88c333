// metrics/mod.rs
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

pub const UPDATES: &str = "lamp_updates_total";
pub const NOTIFICATIONS: &str = "lamp_notifications_total";
pub const NOTIFICATION_FAILURES: &str = "lamp_notification_failures_total";

pub fn setup_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to setup metrics: {}", e))?;

    ::metrics::describe_counter!(UPDATES, "Lamp updates persisted");
    ::metrics::describe_counter!(NOTIFICATIONS, "Device notifications handed to the broker");
    ::metrics::describe_counter!(NOTIFICATION_FAILURES, "Device notifications the broker rejected");
    Ok(())
}
