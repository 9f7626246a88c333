// config/mod.rs
use config::Config;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub mqtt: MqttSettings,
    #[serde(default)]
    pub logger: LoggerSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8080".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
    #[serde(default = "default_db_connect_timeout")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct MqttSettings {
    pub host: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_base_topic")]
    pub base_topic: String,
    #[serde(default = "default_qos")]
    pub qos: u8,
    #[serde(default)]
    pub retain: bool,
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,
    #[serde(default = "default_mqtt_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_reconnect_backoff")]
    pub reconnect_backoff_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggerSettings {
    pub level: LogLevel,
    #[serde(default)]
    pub json: bool,
    pub file: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json: false,
            file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_db_connect_timeout() -> u64 {
    5
}

fn default_mqtt_port() -> u16 {
    1883
}

fn default_client_id() -> String {
    format!("lamp-api-{}", uuid::Uuid::new_v4())
}

fn default_base_topic() -> String {
    "lamp".into()
}

fn default_qos() -> u8 {
    1
}

fn default_keep_alive() -> u64 {
    30
}

fn default_mqtt_connect_timeout() -> u64 {
    10
}

fn default_reconnect_backoff() -> u64 {
    250
}

fn default_metrics_port() -> u16 {
    9000
}

impl Settings {
    /// Reads `path` (extension optional) and overlays `LAMP_*` environment
    /// variables, e.g. `LAMP_DATABASE__URI`.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("LAMP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }
}
