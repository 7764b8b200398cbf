//! # Forest Store - Feature Record Data Access Layer
//!
//! Library for reading and writing geospatial "forest" feature records held in
//! a managed document database (database `NCDR`, collection `forest_polygon`).
//!
//! ## Features
//!
//! - **Typed records**: [`Feature`] keeps `id` strongly typed while leaving
//!   `geometry` and `properties` opaque, GeoJSON-style.
//! - **Trait seam**: [`FeatureStore`] abstracts the backend so the HTTP layer
//!   and tooling never depend on a concrete driver.
//! - **Parameterized queries**: all user-supplied values are bound as BSON
//!   document fields, never interpolated into query text.
//! - **Keyset pagination**: filtered queries return one page and an opaque
//!   continuation token for the next.
//!
//! ## Quick Start
//!
//! ```ignore
//! use forest_store::{FeatureStore, MongoStore, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = MongoStore::connect(&config).await?;
//!
//! if let Some(feature) = store.find_feature("item5").await? {
//!     println!("{}", feature.id);
//! }
//!
//! let page = store.features_by_type("C3A09", 100, None).await?;
//! println!("{} features, more: {}", page.features.len(),
//!          page.continuation_token.is_some());
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `FOREST_DB_URI` | Database endpoint URI | Required |
//! | `FOREST_DB_KEY` | Database access key | Required |
//! | `FOREST_DB_TIMEOUT_SECS` | Connect/server-selection timeout | 10 |

pub mod config;
pub mod error;
pub mod feature;
pub mod mongo;
pub mod store;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use feature::{Feature, FeatureCollection};
pub use mongo::MongoStore;
pub use store::{
    collect_by_type, page_stream, FeaturePage, FeatureStore, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
    UNFILTERED_CAP,
};

#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
