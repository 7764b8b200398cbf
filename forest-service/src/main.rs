//! Forest Service - HTTP read API for forest feature records.
//!
//! A thin facade over a managed document database: requests are validated,
//! translated into parameterized queries, and results re-packaged into
//! GeoJSON-style `FeatureCollection` envelopes.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `FOREST_DB_URI` | Database endpoint URI | Required |
//! | `FOREST_DB_KEY` | Database access key | Required |
//! | `FOREST_DB_TIMEOUT_SECS` | Database request timeout | 10 |
//! | `FOREST_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /` - Static greeting
//! - `GET /items` - Up to 1000 records, unfiltered
//! - `GET /item/:item_id` - Single record by id
//! - `GET /items/forest_type/:forest_type` - Paginated records by type

use std::net::SocketAddr;
use std::sync::Arc;

use forest_service::{router, AppState};
use forest_store::{FeatureStore, MongoStore, StoreConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forest_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("FOREST_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // Missing endpoint or key aborts startup here with a clear diagnostic;
    // handlers never run against a half-configured store.
    let config = StoreConfig::from_env()?;

    tracing::info!(
        timeout_secs = config.timeout.as_secs(),
        "connecting to document database"
    );
    let store = MongoStore::connect(&config).await?;
    tracing::info!("database and collection provisioned");

    let state = Arc::new(AppState {
        store: Arc::new(store),
    });

    // Build router
    let app = router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.close().await;
    tracing::info!("database client released");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
