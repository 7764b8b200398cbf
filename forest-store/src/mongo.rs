//! Document-database [`FeatureStore`] backend.
//!
//! Wraps the async MongoDB driver. Connecting provisions the fixed database
//! and collection (create-if-absent, unique index on `id` — the lookup key
//! the collection is partitioned on) so handlers never run against a missing
//! collection.
//!
//! Every query value is bound through BSON documents built with `doc!`;
//! user input is never formatted into query text.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{Error as DriverError, ErrorKind};
use mongodb::options::{ClientOptions, Credential, IndexOptions};
use mongodb::{Client, Collection, IndexModel};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::feature::Feature;
use crate::store::{next_token, FeaturePage, FeatureStore};

/// Fixed database name; not configurable per request.
pub const DATABASE_NAME: &str = "NCDR";
/// Fixed collection name; not configurable per request.
pub const COLLECTION_NAME: &str = "forest_polygon";

/// Server error code for a create on an already-existing collection.
const NAMESPACE_EXISTS: i32 = 48;

/// Feature store backed by the managed document database.
///
/// Cheap to share behind an `Arc`; the driver multiplexes connections
/// internally and all operations take `&self`.
pub struct MongoStore {
    client: Client,
    collection: Collection<Feature>,
}

impl MongoStore {
    /// Connect to the database and provision the collection.
    ///
    /// The access key from `config` is attached as the credential secret and
    /// the configured timeout is applied to connection establishment and
    /// server selection, so a down database fails requests promptly instead
    /// of hanging on driver defaults.
    ///
    /// # Errors
    ///
    /// Any driver or provisioning failure is returned as
    /// [`StoreError::Database`](crate::StoreError::Database); callers should
    /// treat it as fatal at startup.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(config.timeout);
        options.server_selection_timeout = Some(config.timeout);
        match options.credential.as_mut() {
            Some(credential) => credential.password = Some(config.key.clone()),
            None => {
                options.credential = Some(Credential::builder().password(config.key.clone()).build())
            }
        }

        let client = Client::with_options(options)?;
        let database = client.database(DATABASE_NAME);

        // Create-if-absent; losing the race to another instance is fine.
        if let Err(e) = database.create_collection(COLLECTION_NAME).await {
            if !is_namespace_exists(&e) {
                return Err(e.into());
            }
        }

        let collection = database.collection::<Feature>(COLLECTION_NAME);
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index).await?;

        Ok(Self { client, collection })
    }
}

fn is_namespace_exists(error: &DriverError) -> bool {
    matches!(*error.kind, ErrorKind::Command(ref command) if command.code == NAMESPACE_EXISTS)
}

#[async_trait]
impl FeatureStore for MongoStore {
    async fn list_features(&self, cap: u32) -> Result<Vec<Feature>> {
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .limit(i64::from(cap))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_feature(&self, id: &str) -> Result<Option<Feature>> {
        Ok(self
            .collection
            .find_one(doc! { "id": id })
            .projection(doc! { "_id": 0 })
            .await?)
    }

    async fn features_by_type(
        &self,
        forest_type: &str,
        limit: u32,
        continuation_token: Option<&str>,
    ) -> Result<FeaturePage> {
        let mut filter = doc! { "properties.forest_type": forest_type };
        if let Some(token) = continuation_token {
            filter.insert("id", doc! { "$gt": token });
        }

        let cursor = self
            .collection
            .find(filter)
            .projection(doc! { "_id": 0 })
            .sort(doc! { "id": 1 })
            .limit(i64::from(limit))
            .await?;
        let features: Vec<Feature> = cursor.try_collect().await?;
        let continuation_token = next_token(&features, limit);

        Ok(FeaturePage {
            features,
            continuation_token,
        })
    }

    async fn insert_features(&self, features: &[Feature]) -> Result<u64> {
        if features.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(features).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn upsert_feature(&self, feature: &Feature) -> Result<()> {
        self.collection
            .replace_one(doc! { "id": &feature.id }, feature)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        // shutdown() consumes a handle; the client is internally
        // reference-counted so a clone releases the same resources.
        self.client.clone().shutdown().await;
    }
}
