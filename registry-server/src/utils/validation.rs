//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen for reasonable UX on names, notes and email fields;
//! the store does not enforce text lengths itself.

use chrono::NaiveDate;

use crate::db::models::PagedEmployeeRequest;
use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: employee name, designation, location, project, skill, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Remarks / freeform notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: billable status, reporting line, usernames
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an optional join date: must parse as `yyyy-MM-dd` when present.
pub fn validate_join_date(value: &Option<String>) -> Result<(), AppError> {
    if let Some(v) = value
        && NaiveDate::parse_from_str(v, "%Y-%m-%d").is_err()
    {
        return Err(AppError::validation(format!(
            "joinDate must be a yyyy-MM-dd date, got '{v}'"
        )));
    }
    Ok(())
}

// ── Validation helpers (paged queries) ──────────────────────────────

/// Validate a paged request before it reaches the engine.
///
/// The engine itself does not clamp page parameters; callers supplying
/// `page_number < 1` or `page_size < 1` are rejected here. Any positive
/// page size is accepted.
pub fn validate_page_request(request: &PagedEmployeeRequest) -> Result<(), AppError> {
    if request.page_number < 1 {
        return Err(AppError::validation("pageNumber must be >= 1"));
    }
    if request.page_size < 1 {
        return Err(AppError::validation("pageSize must be >= 1"));
    }
    Ok(())
}
