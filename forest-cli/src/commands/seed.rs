use anyhow::Result;
use forest_store::{Feature, FeatureStore, MongoStore};
use serde_json::json;

const SAMPLE_COUNT: u32 = 9;

/// Upsert the item1..item9 sample records.
///
/// Idempotent: re-running replaces the same ids.
pub async fn run(store: &MongoStore) -> Result<()> {
    for n in 1..=SAMPLE_COUNT {
        let mut feature = Feature::new(format!("item{n}"));
        feature
            .properties
            .insert("productName".to_string(), json!("Widget"));
        feature
            .properties
            .insert("productModel".to_string(), json!(format!("Model {n}")));
        store.upsert_feature(&feature).await?;
    }

    println!("Seeded {} sample records (item1..item{})", SAMPLE_COUNT, SAMPLE_COUNT);
    Ok(())
}
