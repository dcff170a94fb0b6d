//! Employee Model
//!
//! Core personnel record plus the request/response shapes used by the
//! paged-query and bulk-mutation paths. Wire names are camelCase.

use serde::{Deserialize, Serialize};

/// Employee ID type - assigned by the store on creation
pub type EmployeeId = i64;

/// Employee record
///
/// `id` is `None` before creation. Every other attribute is an optional
/// freeform string; `join_date` is stored as a `yyyy-MM-dd` date string.
/// Email uniqueness is enforced by the store at creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: Option<String>,
    pub designation: Option<String>,
    pub reporting_to: Option<String>,
    pub billable_status: Option<String>,
    /// Freeform skill list; comma-like semantics are not interpreted here
    pub skills: Option<String>,
    pub project_allocation: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub join_date: Option<String>,
    pub remarks: Option<String>,
}

/// One filter clause: case-insensitive substring match on a named field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

/// Paged query request (1-based page number)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEmployeeRequest {
    pub page_number: u32,
    pub page_size: u32,
    pub sort_column: Option<String>,
    /// "asc" | "desc", defaults to ascending
    pub sort_dir: Option<String>,
    pub filters: Option<Vec<Filter>>,
}

/// Paged query result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEmployeeResult {
    pub items: Vec<Employee>,
    /// Count after filtering, before paging
    pub total_count: usize,
}

/// Set-oriented bulk update payload
///
/// Fields left as `None` are not touched on any targeted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateRequest {
    pub employee_ids: Vec<EmployeeId>,
    pub designation: Option<String>,
    pub reporting_to: Option<String>,
    pub billable_status: Option<String>,
    pub skills: Option<String>,
    pub project_allocation: Option<String>,
    pub location: Option<String>,
    pub join_date: Option<String>,
}

/// Per-record result entry of the legacy bulk update path
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateOutcome {
    pub id: EmployeeId,
    pub success: bool,
}

/// One-time access credential produced by an invite
///
/// The plaintext password is returned exactly once and never persisted
/// or logged by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCredential {
    pub username: String,
    pub password: String,
    pub user_id: i64,
}

/// Raw invite result from the store
///
/// `code` follows the store contract: positive = the new user id,
/// `0` = already invited, `-1` = employee not found.
#[derive(Debug, Clone)]
pub struct InviteOutcome {
    pub code: i64,
    pub credential: Option<InviteCredential>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_wire_names_are_camel_case() {
        let emp = Employee {
            id: Some(7),
            name: Some("Ana".to_string()),
            reporting_to: Some("Luis".to_string()),
            billable_status: Some("Billable".to_string()),
            project_allocation: Some("Atlas".to_string()),
            join_date: Some("2024-03-01".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&emp).expect("serialize employee");
        assert_eq!(json["reportingTo"], "Luis");
        assert_eq!(json["billableStatus"], "Billable");
        assert_eq!(json["projectAllocation"], "Atlas");
        assert_eq!(json["joinDate"], "2024-03-01");
    }

    #[test]
    fn test_employee_missing_fields_deserialize_to_none() {
        let emp: Employee =
            serde_json::from_str(r#"{"name":"Ana"}"#).expect("deserialize sparse employee");
        assert_eq!(emp.name.as_deref(), Some("Ana"));
        assert!(emp.id.is_none());
        assert!(emp.email.is_none());
    }

    #[test]
    fn test_bulk_update_request_sparse_fields() {
        let req: BulkUpdateRequest =
            serde_json::from_str(r#"{"employeeIds":[1,2],"location":"Lisbon"}"#)
                .expect("deserialize bulk update");
        assert_eq!(req.employee_ids, vec![1, 2]);
        assert_eq!(req.location.as_deref(), Some("Lisbon"));
        assert!(req.designation.is_none());
    }
}
