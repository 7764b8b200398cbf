use std::path::Path;

use anyhow::{bail, Context, Result};
use forest_store::{Feature, FeatureStore, MongoStore};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Insert this many features per database round-trip.
const CHUNK_SIZE: usize = 100;

/// Bulk-insert features from a GeoJSON FeatureCollection file.
///
/// Features without an `id` member get `{id_prefix}{index}` (1-based), so a
/// plain exported FeatureCollection can be loaded as-is.
pub async fn run(store: &MongoStore, input: &Path, id_prefix: &str) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let document: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

    let Some(raw_features) = document.get("features").and_then(Value::as_array) else {
        bail!(
            "Input is not a GeoJSON FeatureCollection: {} has no features array",
            input.display()
        );
    };

    let mut features = Vec::with_capacity(raw_features.len());
    for (index, raw_feature) in raw_features.iter().enumerate() {
        let mut raw_feature = raw_feature.clone();
        if raw_feature.get("id").is_none() {
            if let Some(object) = raw_feature.as_object_mut() {
                object.insert(
                    "id".to_string(),
                    Value::String(format!("{}{}", id_prefix, index + 1)),
                );
            }
        }
        let feature: Feature = serde_json::from_value(raw_feature)
            .with_context(|| format!("Feature #{} is malformed", index + 1))?;
        features.push(feature);
    }

    if features.is_empty() {
        println!("No features in {}", input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(features.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .context("Invalid progress bar template")?,
    );

    let mut inserted = 0;
    for chunk in features.chunks(CHUNK_SIZE) {
        inserted += store.insert_features(chunk).await?;
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("done");

    println!("Inserted {} features from {}", inserted, input.display());
    Ok(())
}
