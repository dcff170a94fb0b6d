//! Employee API Handlers
//!
//! Thin layer over [`RegistryService`]: validates payloads, maps engine
//! errors to HTTP responses, and keeps the read-path degradation (empty
//! result instead of an error) the engine provides.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    BulkUpdateOutcome, BulkUpdateRequest, Employee, EmployeeId, InviteCredential,
    PagedEmployeeRequest, PagedEmployeeResult,
};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_join_date,
    validate_optional_text, validate_page_request, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

fn validate_employee(payload: &Employee) -> Result<(), AppError> {
    let name = payload.name.as_deref().unwrap_or("");
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.designation, "designation", MAX_NAME_LEN)?;
    validate_optional_text(&payload.reporting_to, "reportingTo", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.billable_status, "billableStatus", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.skills, "skills", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.project_allocation, "projectAllocation", MAX_NAME_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.remarks, "remarks", MAX_NOTE_LEN)?;
    validate_join_date(&payload.join_date)
}

fn validate_bulk_fields(payload: &BulkUpdateRequest) -> Result<(), AppError> {
    validate_optional_text(&payload.designation, "designation", MAX_NAME_LEN)?;
    validate_optional_text(&payload.reporting_to, "reportingTo", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.billable_status, "billableStatus", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.skills, "skills", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.project_allocation, "projectAllocation", MAX_NAME_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_NAME_LEN)?;
    validate_join_date(&payload.join_date)
}

/// List all employees
///
/// Degrades to an empty list when the store is unavailable.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Employee>> {
    Json(state.registry.get_all().await)
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<EmployeeId>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .registry
        .get(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(Json(employee))
}

/// Fetch the employees matching an id set
pub async fn get_by_ids(
    State(state): State<ServerState>,
    Json(ids): Json<Vec<EmployeeId>>,
) -> Json<Vec<Employee>> {
    Json(state.registry.get_by_ids(&ids).await)
}

/// Filtered, sorted, paginated query
pub async fn paged(
    State(state): State<ServerState>,
    Json(request): Json<PagedEmployeeRequest>,
) -> AppResult<Json<PagedEmployeeResult>> {
    validate_page_request(&request)?;
    let result = state.registry.page(&request).await?;
    Ok(Json(result))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Employee>,
) -> AppResult<Json<Employee>> {
    validate_employee(&payload)?;
    let employee = state.registry.add(payload).await?;
    Ok(Json(employee))
}

/// Update an employee in place
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<EmployeeId>,
    Json(payload): Json<Employee>,
) -> AppResult<Json<Employee>> {
    validate_employee(&payload)?;
    if !state.registry.update(id, payload.clone()).await {
        return Err(AppError::not_found(format!("Employee {id} not found")));
    }
    let mut updated = payload;
    updated.id = Some(id);
    Ok(Json(updated))
}

/// Delete an employee, returning the removed record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<EmployeeId>,
) -> AppResult<Json<Employee>> {
    let removed = state
        .registry
        .delete(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(Json(removed))
}

/// Apply a sparse field set to a set of employees as one store write
pub async fn bulk_update(
    State(state): State<ServerState>,
    Json(request): Json<BulkUpdateRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_bulk_fields(&request)?;
    state.registry.bulk_update(&request).await?;
    Ok(ok_with_message(
        (),
        format!("Updated {} employees", request.employee_ids.len()),
    ))
}

/// Insert a batch of employees as one store write
pub async fn bulk_insert(
    State(state): State<ServerState>,
    Json(records): Json<Vec<Employee>>,
) -> AppResult<Json<AppResponse<()>>> {
    for record in &records {
        validate_employee(record)?;
    }
    let count = records.len();
    state.registry.bulk_insert(records).await?;
    Ok(ok_with_message((), format!("Inserted {count} employees")))
}

/// Legacy bulk update: loops the single-record path, reporting per-record
/// success. Records without an id come back with id -1 and success false.
pub async fn bulk_update_legacy(
    State(state): State<ServerState>,
    Json(records): Json<Vec<Employee>>,
) -> Json<Vec<BulkUpdateOutcome>> {
    Json(state.registry.bulk_update_legacy(records).await)
}

/// Issue a one-time login credential for the employee
pub async fn invite(
    State(state): State<ServerState>,
    Path(id): Path<EmployeeId>,
) -> AppResult<Json<InviteCredential>> {
    let credential = state.registry.invite(id).await?;
    Ok(Json(credential))
}
