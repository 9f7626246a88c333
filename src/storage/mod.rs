// storage/mod.rs
mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoLampStore;

use crate::{error::AppError, models::Lamp};

/// Durable, id-keyed lamp collection. Implementations are shared across
/// request tasks and must be safe for concurrent use.
#[async_trait::async_trait]
pub trait LampStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Lamp>, AppError>;
    async fn get(&self, id: &str) -> Result<Lamp, AppError>;
    /// Raw insert. An existing record with the same id is not checked for.
    async fn create(&self, lamp: &Lamp) -> Result<(), AppError>;
    /// Upsert keyed by `lamp.id`, replacing every stored field.
    async fn update(&self, lamp: &Lamp) -> Result<(), AppError>;
    /// Succeeds whether or not the record existed.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
