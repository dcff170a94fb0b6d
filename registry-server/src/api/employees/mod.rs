//! Employee API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // 查询管线与批量变更
        .route("/paged", post(handler::paged))
        .route("/by-ids", post(handler::get_by_ids))
        .route("/bulk-update", post(handler::bulk_update))
        .route("/bulk-insert", post(handler::bulk_insert))
        .route("/bulk", put(handler::bulk_update_legacy))
        // 邀请
        .route("/{id}/invite", post(handler::invite))
}
