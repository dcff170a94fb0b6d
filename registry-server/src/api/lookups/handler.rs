//! Lookup Catalog Handlers
//!
//! Dropdown catalogs backing the registry UI. All read handlers degrade
//! to an empty list when the store is unavailable.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub name: String,
}

pub async fn designations(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.registry.designations().await)
}

pub async fn locations(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.registry.locations().await)
}

pub async fn billable_statuses(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.registry.billable_statuses().await)
}

pub async fn skills(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.registry.skills().await)
}

pub async fn projects(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.registry.projects().await)
}

/// Add a skill to the catalog if not already present
pub async fn add_skill(
    State(state): State<ServerState>,
    Json(request): Json<AddSkillRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_required_text(&request.name, "name", MAX_NAME_LEN)?;
    state.registry.add_skill_if_missing(&request.name).await;
    Ok(ok_with_message((), format!("Skill '{}' recorded", request.name)))
}
