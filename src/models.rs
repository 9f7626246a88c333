use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::synchronizer::LampSynchronizer;

/// Last known desired state of one lamp. Stored as one document per lamp,
/// keyed by `id` rather than the store's own identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Lamp {
    /// External key. Ignored in update bodies, the path id wins.
    #[serde(default)]
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    pub name: String,
    pub group: String,
    pub power: bool,
    #[validate(range(min = 0, max = 100, message = "brightness must be within 0..=100"))]
    pub brightness: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

pub struct AppState {
    pub lamps: LampSynchronizer,
}

impl AppState {
    pub fn new(lamps: LampSynchronizer) -> Self {
        Self { lamps }
    }
}
