use anyhow::{bail, Result};
use forest_store::{FeatureStore, MongoStore};

/// Fetch a single feature by id and pretty-print it.
pub async fn run(store: &MongoStore, id: &str) -> Result<()> {
    match store.find_feature(id).await? {
        Some(feature) => {
            println!("{}", serde_json::to_string_pretty(&feature)?);
            Ok(())
        }
        None => bail!("Feature not found: {}", id),
    }
}
