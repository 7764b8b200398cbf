//! The [`FeatureStore`] trait and pagination primitives.
//!
//! The trait is the seam between the HTTP layer / tooling and a concrete
//! backend ([`MongoStore`](crate::MongoStore) in production,
//! [`MemoryStore`](crate::MemoryStore) in tests). All backends share the same
//! continuation-token contract: a page that fills its limit carries a token
//! for the next page, a shorter page carries none.

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};

use crate::error::Result;
use crate::feature::Feature;

/// Maximum number of records returned by an unfiltered listing.
pub const UNFILTERED_CAP: u32 = 1000;
/// Page limit applied when the caller does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;
/// Hard ceiling on the page limit; larger requests must be rejected.
pub const MAX_PAGE_LIMIT: u32 = 2000;

/// One page of a filtered query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturePage {
    /// Records on this page, ordered by id.
    pub features: Vec<Feature>,
    /// Opaque cursor for the next page; `None` when exhausted.
    ///
    /// A page that exactly fills its limit carries a token even when no
    /// further records exist; the follow-up query then yields an empty page
    /// with no token.
    pub continuation_token: Option<String>,
}

/// Read/write access to the feature collection.
///
/// Implementations must bind every user-supplied value as a query parameter;
/// interpolating ids or filters into query text is a defect.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Return up to `cap` records, unfiltered.
    async fn list_features(&self, cap: u32) -> Result<Vec<Feature>>;

    /// Look up a single record by id.
    async fn find_feature(&self, id: &str) -> Result<Option<Feature>>;

    /// Return one page of records matching `forest_type`, resuming from
    /// `continuation_token` when given.
    async fn features_by_type(
        &self,
        forest_type: &str,
        limit: u32,
        continuation_token: Option<&str>,
    ) -> Result<FeaturePage>;

    /// Bulk-insert records, returning how many were written.
    async fn insert_features(&self, features: &[Feature]) -> Result<u64>;

    /// Insert or replace a single record by id.
    async fn upsert_feature(&self, feature: &Feature) -> Result<()>;

    /// Release the underlying client. Safe to call once at shutdown.
    async fn close(&self) {}
}

/// Compute the continuation token for a page fetched with `limit`.
///
/// Keyset scheme: the token is the id of the last record of a full page;
/// queries resume with `id > token`.
pub(crate) fn next_token(features: &[Feature], limit: u32) -> Option<String> {
    if features.len() as u32 == limit {
        features.last().map(|f| f.id.clone())
    } else {
        None
    }
}

/// Lazily stream pages of a filtered query, following continuation tokens
/// until the result set is exhausted.
///
/// Nothing is fetched until the stream is polled; dropping the stream stops
/// the iteration.
pub fn page_stream<'a>(
    store: &'a dyn FeatureStore,
    forest_type: &'a str,
    page_size: u32,
) -> impl Stream<Item = Result<FeaturePage>> + 'a {
    stream::try_unfold(
        (None::<String>, false),
        move |(token, exhausted)| async move {
            if exhausted {
                return Ok(None);
            }
            let page = store
                .features_by_type(forest_type, page_size, token.as_deref())
                .await?;
            let next = page.continuation_token.clone();
            let exhausted = next.is_none();
            Ok(Some((page, (next, exhausted))))
        },
    )
}

/// Materialize the full result set of a filtered query by draining
/// [`page_stream`].
pub async fn collect_by_type(
    store: &dyn FeatureStore,
    forest_type: &str,
    page_size: u32,
) -> Result<Vec<Feature>> {
    let pages = page_stream(store, forest_type, page_size);
    futures::pin_mut!(pages);

    let mut features = Vec::new();
    while let Some(page) = pages.try_next().await? {
        features.extend(page.features);
    }
    Ok(features)
}
