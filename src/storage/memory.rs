// storage/memory.rs
//! In-process stand-in for the document collection. Mirrors its semantics:
//! inserts never check ids, upsert replaces the first match, delete removes
//! the first match.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use super::LampStore;
use crate::{error::AppError, models::Lamp};

#[derive(Default)]
pub struct MemoryLampStore {
    documents: Mutex<Vec<Lamp>>,
    unavailable: AtomicBool,
}

impl MemoryLampStore {
    pub fn with_lamps(lamps: impl IntoIterator<Item = Lamp>) -> Self {
        Self {
            documents: Mutex::new(lamps.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    pub async fn count(&self, id: &str) -> usize {
        self.documents.lock().await.iter().filter(|l| l.id == id).count()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LampStore for MemoryLampStore {
    async fn list(&self) -> Result<Vec<Lamp>, AppError> {
        self.check()?;
        Ok(self.documents.lock().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Lamp, AppError> {
        self.check()?;
        self.documents
            .lock()
            .await
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_owned()))
    }

    async fn create(&self, lamp: &Lamp) -> Result<(), AppError> {
        self.check()?;
        self.documents.lock().await.push(lamp.clone());
        Ok(())
    }

    async fn update(&self, lamp: &Lamp) -> Result<(), AppError> {
        self.check()?;
        let mut documents = self.documents.lock().await;
        match documents.iter_mut().find(|l| l.id == lamp.id) {
            Some(existing) => *existing = lamp.clone(),
            None => documents.push(lamp.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.check()?;
        let mut documents = self.documents.lock().await;
        if let Some(pos) = documents.iter().position(|l| l.id == id) {
            documents.remove(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp(id: &str) -> Lamp {
        Lamp {
            id: id.into(),
            name: "Hall".into(),
            group: "hall".into(),
            power: false,
            brightness: 0,
        }
    }

    #[tokio::test]
    async fn update_upserts_missing_record() {
        let store = MemoryLampStore::default();
        store.update(&lamp("a")).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), lamp("a"));
    }

    #[tokio::test]
    async fn duplicate_create_keeps_both_documents() {
        let store = MemoryLampStore::default();
        store.create(&lamp("a")).await.unwrap();
        store.create(&lamp("a")).await.unwrap();
        assert_eq!(store.count("a").await, 2);
    }

    #[tokio::test]
    async fn outage_fails_every_operation() {
        let store = MemoryLampStore::with_lamps([lamp("a")]);
        store.set_unavailable(true);
        assert!(matches!(store.list().await, Err(AppError::StoreUnavailable(_))));
        assert!(matches!(store.get("a").await, Err(AppError::StoreUnavailable(_))));
        assert!(matches!(store.delete("a").await, Err(AppError::StoreUnavailable(_))));
    }
}
