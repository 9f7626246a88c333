// synchronizer.rs
use std::sync::Arc;

use ::metrics::counter;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    error::AppError,
    metrics::{NOTIFICATIONS, UPDATES},
    models::Lamp,
    notifier::NotificationPublisher,
    storage::LampStore,
    utils,
};

/// The one field change an update is announced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampChange {
    Power(bool),
    Brightness(i64),
}

impl LampChange {
    /// Power takes priority over brightness; at most one change is reported.
    pub fn between(current: &Lamp, next: &Lamp) -> Option<Self> {
        if current.power != next.power {
            Some(LampChange::Power(next.power))
        } else if current.brightness != next.brightness {
            Some(LampChange::Brightness(next.brightness))
        } else {
            None
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            LampChange::Power(_) => "power",
            LampChange::Brightness(_) => "brightness",
        }
    }

    pub fn payload(&self) -> String {
        match self {
            LampChange::Power(on) => u8::from(*on).to_string(),
            LampChange::Brightness(level) => level.to_string(),
        }
    }
}

/// Applies lamp mutations to the store and mirrors power and brightness
/// changes onto the broker.
pub struct LampSynchronizer {
    store: Arc<dyn LampStore>,
    publisher: Arc<dyn NotificationPublisher>,
    base_topic: String,
}

impl LampSynchronizer {
    pub fn new(
        store: Arc<dyn LampStore>,
        publisher: Arc<dyn NotificationPublisher>,
        base_topic: impl Into<String>,
    ) -> Self {
        Self {
            store,
            publisher,
            base_topic: base_topic.into(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Lamp>, AppError> {
        self.store.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Lamp, AppError> {
        self.store.get(id).await
    }

    pub async fn create(&self, lamp: Lamp) -> Result<Lamp, AppError> {
        lamp.validate()?;
        self.store.create(&lamp).await?;
        info!(lamp_id = %lamp.id, "Lamp created");
        Ok(lamp)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id).await?;
        info!(lamp_id = %id, "Lamp deleted");
        Ok(())
    }

    /// Replaces the lamp at `id` with `lamp` (its own id is ignored) and
    /// publishes the highest priority field change, if any. The result does
    /// not depend on the broker.
    pub async fn update(&self, id: &str, mut lamp: Lamp) -> Result<Lamp, AppError> {
        lamp.id = id.to_owned();
        lamp.validate()?;

        let current = self.store.get(id).await?;
        self.store.update(&lamp).await?;
        counter!(UPDATES).increment(1);

        match LampChange::between(&current, &lamp) {
            Some(change) => {
                let topic = utils::lamp_topic(&self.base_topic, id, change.field());
                debug!(lamp_id = %id, %topic, ?change, "Notifying device");
                counter!(NOTIFICATIONS, "field" => change.field()).increment(1);
                self.publisher.publish(topic, change.payload());
            }
            None => debug!(lamp_id = %id, "No device-visible change"),
        }

        Ok(lamp)
    }
}
