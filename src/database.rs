use crate::constants::*;
use mongodb::bson::{Bson, Document};
use mongodb::error::Result as MongoResult;
use mongodb::options::{
    ClientOptions, CreateIndexOptions, DeleteOptions, FindOneOptions, InsertOneOptions,
    UpdateOptions,
};
use mongodb::{Client, IndexModel};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Counts reported by a single-document update
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateCount {
    pub matched: u64,
    pub modified: u64,
}

/// Thin wrapper over the mongodb client.
/// Every store access in the crate goes through here so that it can be mocked.
pub struct AppDatabase(Client);

#[cfg_attr(test, automock)]
impl AppDatabase {
    pub async fn new() -> anyhow::Result<Self> {
        // MONGODB_URI is mandatory, pool sizes fall back to the defaults
        let uri = std::env::var("MONGODB_URI")
            .map_err(|_| anyhow::anyhow!("MONGODB_URI not found in environment"))?;
        Self::with_uri(&uri).await
    }

    pub async fn with_uri(uri: &str) -> anyhow::Result<Self> {
        let min_pool = std::env::var("MONGODB_MIN_POOL_SIZE").unwrap_or_default();
        let max_pool = std::env::var("MONGODB_MAX_POOL_SIZE").unwrap_or_default();
        let min_pool = min_pool.parse::<u32>().unwrap_or(MONGO_MIN_POOL_SIZE);
        let max_pool = max_pool.parse::<u32>().unwrap_or(MONGO_MAX_POOL_SIZE);
        let timeout = Duration::from_secs(MONGO_CONN_TIMEOUT);
        // create the mongodb client options
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.max_pool_size = Some(max_pool);
        client_options.min_pool_size = Some(min_pool);
        client_options.connect_timeout = Some(timeout);
        // the client connects lazily, nothing is sent until the first operation
        let client = Client::with_options(client_options)?;
        let app_db = Self(client);
        Ok(app_db)
    }

    pub async fn find_one<T>(
        &self,
        db: &str,
        coll: &str,
        filter: Option<Document>,
        options: Option<FindOneOptions>,
    ) -> MongoResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        coll.find_one(filter, options).await
    }

    pub async fn insert_one<T>(
        &self,
        db: &str,
        coll: &str,
        doc: &T,
        options: Option<InsertOneOptions>,
    ) -> MongoResult<Bson>
    where
        T: Serialize + Send + Sync + 'static,
    {
        let coll = self.0.database(db).collection::<T>(coll);
        let result = coll.insert_one(doc, options).await?;
        Ok(result.inserted_id)
    }

    pub async fn update_one(
        &self,
        db: &str,
        coll: &str,
        filter: Document,
        update: Document,
        options: Option<UpdateOptions>,
    ) -> MongoResult<UpdateCount> {
        let coll = self.0.database(db).collection::<Document>(coll);
        let result = coll.update_one(filter, update, options).await?;
        let count = UpdateCount {
            matched: result.matched_count,
            modified: result.modified_count,
        };
        Ok(count)
    }

    pub async fn delete_many(
        &self,
        db: &str,
        coll: &str,
        filter: Document,
        options: Option<DeleteOptions>,
    ) -> MongoResult<u64> {
        let coll = self.0.database(db).collection::<Document>(coll);
        let result = coll.delete_many(filter, options).await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(
        &self,
        db: &str,
        coll: &str,
        indexes: Vec<IndexModel>,
        options: Option<CreateIndexOptions>,
    ) -> MongoResult<Vec<String>> {
        let coll = self.0.database(db).collection::<Document>(coll);
        let result = coll.create_indexes(indexes, options).await?;
        Ok(result.index_names)
    }
}
