//! In-memory [`FeatureStore`] backend.
//!
//! Keeps features in a `BTreeMap` keyed by id so iteration order matches the
//! keyset pagination order of the database backend. Intended for tests and
//! local development; enabled with the `memory` feature.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::feature::Feature;
use crate::store::{next_token, FeaturePage, FeatureStore};

/// In-memory feature store with the same pagination contract as the
/// database-backed store.
#[derive(Default)]
pub struct MemoryStore {
    features: RwLock<BTreeMap<String, Feature>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given features.
    pub fn with_features(features: impl IntoIterator<Item = Feature>) -> Self {
        let map = features.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self {
            features: RwLock::new(map),
        }
    }

    /// Number of stored features.
    pub fn len(&self) -> usize {
        self.features.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Feature>>> {
        self.features
            .read()
            .map_err(|_| StoreError::Internal("feature map lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Feature>>> {
        self.features
            .write()
            .map_err(|_| StoreError::Internal("feature map lock poisoned".to_string()))
    }
}

#[async_trait]
impl FeatureStore for MemoryStore {
    async fn list_features(&self, cap: u32) -> Result<Vec<Feature>> {
        let map = self.read()?;
        Ok(map.values().take(cap as usize).cloned().collect())
    }

    async fn find_feature(&self, id: &str) -> Result<Option<Feature>> {
        let map = self.read()?;
        Ok(map.get(id).cloned())
    }

    async fn features_by_type(
        &self,
        forest_type: &str,
        limit: u32,
        continuation_token: Option<&str>,
    ) -> Result<FeaturePage> {
        let map = self.read()?;
        let features: Vec<Feature> = map
            .values()
            .filter(|f| f.forest_type() == Some(forest_type))
            .filter(|f| continuation_token.map_or(true, |token| f.id.as_str() > token))
            .take(limit as usize)
            .cloned()
            .collect();
        let continuation_token = next_token(&features, limit);
        Ok(FeaturePage {
            features,
            continuation_token,
        })
    }

    async fn insert_features(&self, features: &[Feature]) -> Result<u64> {
        let mut map = self.write()?;
        for feature in features {
            map.insert(feature.id.clone(), feature.clone());
        }
        Ok(features.len() as u64)
    }

    async fn upsert_feature(&self, feature: &Feature) -> Result<()> {
        let mut map = self.write()?;
        map.insert(feature.id.clone(), feature.clone());
        Ok(())
    }
}
