//! pop-api - Query service for popchart
//!
//! Serves `GET /population`: every stored record whose country is in the
//! configured allowlist, as a JSON array.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pop_core::PopulationRecord;
use pop_db::PopulationStore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// State shared across all handlers
pub struct ApiState {
    store: Arc<dyn PopulationStore>,
    countries: Vec<String>,
    allowed: HashSet<String>,
}

impl ApiState {
    pub fn new(store: Arc<dyn PopulationStore>, countries: Vec<String>) -> Self {
        let allowed = countries.iter().cloned().collect();
        Self {
            store,
            countries,
            allowed,
        }
    }

    /// Countries this service will return
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Read the allowlisted records from the store.
    ///
    /// Rows are re-checked against the allowlist so a store that over-returns
    /// cannot widen what the endpoint exposes.
    pub async fn population(&self) -> pop_db::DbResult<Vec<PopulationRecord>> {
        let mut records = self.store.select_by_countries(&self.countries).await?;
        records.retain(|r| self.allowed.contains(&r.country));
        Ok(records)
    }
}

/// Build the router with permissive CORS
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/population", get(get_population))
        .layer(cors)
        .with_state(state)
}

/// Serve the router on an already-bound listener until the server fails
pub async fn serve(listener: TcpListener, state: Arc<ApiState>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Server running at http://{addr}");
    }
    axum::serve(listener, router(state)).await
}

async fn get_population(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<PopulationRecord>>, StatusCode> {
    match state.population().await {
        Ok(records) => {
            log::debug!("GET /population -> {} records", records.len());
            Ok(Json(records))
        }
        Err(e) => {
            log::error!("GET /population failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
