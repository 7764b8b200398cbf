pub mod get;
pub mod list;
pub mod load;
pub mod seed;

use anyhow::{Context, Result};
use forest_store::{MongoStore, StoreConfig};

/// Build a connected store from explicit arguments or the environment.
pub async fn connect(uri: Option<String>, key: Option<String>) -> Result<MongoStore> {
    let config = match (uri, key) {
        (Some(uri), Some(key)) => StoreConfig::new(uri, key),
        _ => StoreConfig::from_env()
            .context("database not configured. Use --uri/--key or set FOREST_DB_URI and FOREST_DB_KEY")?,
    };

    MongoStore::connect(&config)
        .await
        .context("Failed to connect to the document database")
}
