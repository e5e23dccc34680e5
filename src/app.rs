use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/datasets", get(handlers::list_datasets))
        .route(
            "/api/datasets/:dataset/records",
            get(handlers::list_records).post(handlers::add_record),
        )
        .route("/api/datasets/:dataset/series", get(handlers::get_series))
        .route("/api/datasets/:dataset/most-common", get(handlers::get_most_common))
        .with_state(state)
}
