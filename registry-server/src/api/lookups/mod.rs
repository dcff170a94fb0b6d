//! Lookup Catalog API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Lookup router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/lookups", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/designations", get(handler::designations))
        .route("/locations", get(handler::locations))
        .route("/billable-statuses", get(handler::billable_statuses))
        .route("/skills", get(handler::skills).post(handler::add_skill))
        .route("/projects", get(handler::projects))
}
