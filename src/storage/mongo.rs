// storage/mongo.rs
use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::{Client, Collection, bson::doc, options::ClientOptions};
use tracing::{debug, info};

use super::LampStore;
use crate::{config::DatabaseSettings, error::AppError, models::Lamp};

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

pub struct MongoLampStore {
    collection: Collection<Lamp>,
}

impl MongoLampStore {
    /// Connects and pings the database; an unreachable server fails here
    /// instead of on the first request.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&settings.uri).await?;
        options.app_name = Some("lamp-api".into());
        options.server_selection_timeout = Some(Duration::from_secs(settings.connect_timeout_secs));

        let client = Client::with_options(options)?;
        let database = client.database(&settings.database);
        database.run_command(doc! { "ping": 1 }).await?;

        info!(
            database = %settings.database,
            collection = %settings.collection,
            "Connected to MongoDB"
        );

        Ok(Self {
            collection: database.collection(&settings.collection),
        })
    }
}

#[async_trait::async_trait]
impl LampStore for MongoLampStore {
    async fn list(&self) -> Result<Vec<Lamp>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get(&self, id: &str) -> Result<Lamp, AppError> {
        self.collection
            .find_one(doc! { "id": id })
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_owned()))
    }

    async fn create(&self, lamp: &Lamp) -> Result<(), AppError> {
        self.collection.insert_one(lamp).await?;
        debug!(lamp_id = %lamp.id, "Inserted lamp");
        Ok(())
    }

    async fn update(&self, lamp: &Lamp) -> Result<(), AppError> {
        let result = self
            .collection
            .replace_one(doc! { "id": lamp.id.as_str() }, lamp)
            .upsert(true)
            .await?;
        debug!(
            lamp_id = %lamp.id,
            matched = result.matched_count,
            upserted = result.upserted_id.is_some(),
            "Replaced lamp"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        debug!(lamp_id = %id, deleted = result.deleted_count, "Deleted lamp");
        Ok(())
    }
}
