//! HTTP request handlers for the forest feature API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use forest_store::{
    FeatureCollection, StoreError, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, UNFILTERED_CAP,
};

use crate::AppState;

/// Static greeting returned by the root endpoint.
#[derive(Debug, Serialize)]
pub struct Greeting {
    /// Greeting text.
    pub message: String,
}

/// Envelope for unfiltered and by-id responses.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    /// Wrapped feature collection.
    pub data: FeatureCollection,
}

/// Envelope for paginated, filtered responses.
#[derive(Debug, Serialize)]
pub struct PagedItemsResponse {
    /// Wrapped feature collection for this page.
    pub data: FeatureCollection,
    /// Cursor for the next page; serialized as `null` when exhausted.
    pub continuation_token: Option<String>,
}

/// Query parameters for the forest-type endpoint.
#[derive(Debug, Deserialize)]
pub struct ForestTypeQuery {
    /// Page limit (default 1000, ceiling 2000).
    pub limit: Option<u32>,
    /// Opaque cursor from a previous page.
    pub continuation_token: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Failures a handler can surface to the client.
#[derive(Debug)]
pub enum ApiError {
    /// No record matches the requested id.
    NotFound(String),
    /// The requested page limit is outside `1..=2000`.
    InvalidLimit(u32),
    /// The store reported a failure; detail is logged, not leaked.
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("item not found: {id}")),
            Self::InvalidLimit(limit) => (
                StatusCode::BAD_REQUEST,
                format!("limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"),
            ),
            Self::Store(e) => {
                tracing::error!(error = %e, "query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to query items".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Root endpoint.
///
/// Returns a static greeting; no inputs, no failure modes.
pub async fn read_root() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello, forest features!".to_string(),
    })
}

/// List up to 1000 records, unfiltered.
///
/// # Returns
///
/// - `200 OK` with a `FeatureCollection` envelope
/// - `500 Internal Server Error` on a database failure
pub async fn read_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let features = state.store.list_features(UNFILTERED_CAP).await?;
    tracing::debug!(count = features.len(), "unfiltered listing");

    Ok(Json(ItemsResponse {
        data: FeatureCollection::new(features),
    }))
}

/// Look up a single record by id.
///
/// # Returns
///
/// - `200 OK` with a single-element `FeatureCollection` envelope
/// - `404 Not Found` if no record matches
/// - `500 Internal Server Error` on a database failure
#[axum::debug_handler]
pub async fn read_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemsResponse>, ApiError> {
    tracing::debug!(id = %item_id, "item lookup");

    match state.store.find_feature(&item_id).await? {
        Some(feature) => Ok(Json(ItemsResponse {
            data: FeatureCollection::new(vec![feature]),
        })),
        None => Err(ApiError::NotFound(item_id)),
    }
}

/// One page of records matching a forest type.
///
/// # Query Parameters
///
/// - `limit`: page size, default 1000, must be within `1..=2000`
/// - `continuation_token`: opaque cursor from a previous page
///
/// # Returns
///
/// - `200 OK` with a page and the next cursor (`null` when exhausted); an
///   empty page is a valid response, not an error
/// - `400 Bad Request` if the limit is out of range, before any database call
/// - `500 Internal Server Error` on a database failure
pub async fn read_items_by_forest_type(
    State(state): State<Arc<AppState>>,
    Path(forest_type): Path<String>,
    Query(query): Query<ForestTypeQuery>,
) -> Result<Json<PagedItemsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    // limit 0 means "unbounded" at the driver level, so it is rejected too.
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(ApiError::InvalidLimit(limit));
    }

    let page = state
        .store
        .features_by_type(&forest_type, limit, query.continuation_token.as_deref())
        .await?;
    tracing::debug!(
        forest_type = %forest_type,
        limit,
        count = page.features.len(),
        more = page.continuation_token.is_some(),
        "filtered page"
    );

    Ok(Json(PagedItemsResponse {
        data: FeatureCollection::new(page.features),
        continuation_token: page.continuation_token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forest_store::Feature;

    #[test]
    fn test_forest_type_query_deserialize() {
        let query: ForestTypeQuery =
            serde_json::from_str(r#"{"limit": 25, "continuation_token": "item7"}"#).unwrap();
        assert_eq!(query.limit, Some(25));
        assert_eq!(query.continuation_token.as_deref(), Some("item7"));

        let query: ForestTypeQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, None);
        assert_eq!(query.continuation_token, None);
    }

    #[test]
    fn test_paged_response_serializes_null_token() {
        let response = PagedItemsResponse {
            data: FeatureCollection::new(vec![]),
            continuation_token: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value["continuation_token"].is_null());
        assert_eq!(value["data"]["type"], "FeatureCollection");
    }

    #[test]
    fn test_items_response_envelope() {
        let response = ItemsResponse {
            data: FeatureCollection::new(vec![Feature::new("item1")]),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["features"][0]["id"], "item1");
    }
}
