//! Registry Query & Mutation Engine
//!
//! Owns no persistent state: every operation fetches what it needs through
//! the [`EmployeeStore`] gateway, works on transient values and discards
//! them with the response.
//!
//! # Failure policy
//!
//! Bulk paths, single-record creation, `page` and `invite` propagate store
//! failures to the caller. The list-style read paths (`get_all`, `get`,
//! `get_by_ids`, the lookup catalogs) log store failures and degrade to an
//! empty result, so their callers cannot tell "no data" from "store down".
//! That asymmetry is carried over from the system this replaces; see
//! DESIGN.md before unifying it.

use std::sync::Arc;

use crate::db::models::{
    BulkUpdateOutcome, BulkUpdateRequest, Employee, EmployeeId, InviteCredential,
    PagedEmployeeRequest, PagedEmployeeResult,
};
use crate::db::store::EmployeeStore;
use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::filter::{apply_filters, page_slice, sort_records};

/// Sentinel id reported for records that reach the legacy bulk path
/// without an id
pub const MISSING_ID_SENTINEL: EmployeeId = -1;

/// The engine exposed to the HTTP façade
#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn EmployeeStore>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    // ── Paged queries ───────────────────────────────────────────────

    /// Answer a filtered, sorted, paginated query.
    ///
    /// Fetches the complete record set and filters in memory; `total_count`
    /// reflects the filtered set regardless of the requested page. Callers
    /// must validate `page_number >= 1` and `page_size >= 1` beforehand.
    pub async fn page(&self, request: &PagedEmployeeRequest) -> RegistryResult<PagedEmployeeResult> {
        let records = self.store.fetch_all().await?;

        let filters = request.filters.as_deref().unwrap_or(&[]);
        let mut filtered = apply_filters(records, filters);
        let total_count = filtered.len();

        sort_records(
            &mut filtered,
            request.sort_column.as_deref(),
            request.sort_dir.as_deref(),
        );

        let items = page_slice(filtered, request.page_number, request.page_size);
        Ok(PagedEmployeeResult { items, total_count })
    }

    // ── Bulk mutation pipeline ──────────────────────────────────────

    /// Apply a sparse field set to every id in the request, as one
    /// set-oriented store write. All-or-nothing from the caller's view.
    pub async fn bulk_update(&self, request: &BulkUpdateRequest) -> RegistryResult<()> {
        if request.employee_ids.is_empty() {
            return Err(RegistryError::Validation(
                "employeeIds must not be empty".to_string(),
            ));
        }
        self.store.bulk_update_set(request).await?;
        tracing::info!(
            count = request.employee_ids.len(),
            "Bulk update applied to employee set"
        );
        Ok(())
    }

    /// Insert a whole batch as one set-oriented store write
    pub async fn bulk_insert(&self, records: Vec<Employee>) -> RegistryResult<()> {
        if records.is_empty() {
            return Err(RegistryError::Validation(
                "employee list must not be empty".to_string(),
            ));
        }
        let count = records.len();
        self.store.bulk_insert_set(records).await?;
        tracing::info!(count, "Bulk insert completed");
        Ok(())
    }

    // ── Legacy per-record path ──────────────────────────────────────

    /// Create one record, returning it with the store-assigned id.
    /// Creation failures (including duplicate email) are re-raised.
    pub async fn add(&self, record: Employee) -> RegistryResult<Employee> {
        let created = self.store.insert(record).await?;
        tracing::info!(id = created.id, "Employee added");
        Ok(created)
    }

    /// Fetch all records; degrades to empty on store failure
    pub async fn get_all(&self) -> Vec<Employee> {
        match self.store.fetch_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch employees, returning empty set");
                Vec::new()
            }
        }
    }

    /// Fetch one record; degrades to `None` on store failure
    pub async fn get(&self, id: EmployeeId) -> Option<Employee> {
        match self.store.fetch_one(id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to fetch employee");
                None
            }
        }
    }

    /// Fetch the records in the id set; degrades to empty on store failure
    pub async fn get_by_ids(&self, ids: &[EmployeeId]) -> Vec<Employee> {
        if ids.is_empty() {
            return Vec::new();
        }
        match self.store.fetch_by_ids(ids).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch employees by id set");
                Vec::new()
            }
        }
    }

    /// Replace one record in place; `false` when the id is unknown or the
    /// store failed
    pub async fn update(&self, id: EmployeeId, record: Employee) -> bool {
        match self.store.update_one(id, record).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to update employee");
                false
            }
        }
    }

    /// Delete one record, returning the pre-deletion snapshot
    pub async fn delete(&self, id: EmployeeId) -> Option<Employee> {
        let snapshot = self.get(id).await?;
        match self.store.delete_one(id).await {
            Ok(true) => {
                tracing::info!(id, "Employee deleted");
                Some(snapshot)
            }
            Ok(false) => None,
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to delete employee");
                None
            }
        }
    }

    /// Loop the single-record update over a batch, isolating failures
    /// per item. Records without an id are reported failed with
    /// [`MISSING_ID_SENTINEL`].
    pub async fn bulk_update_legacy(&self, records: Vec<Employee>) -> Vec<BulkUpdateOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            let Some(id) = record.id else {
                tracing::warn!("Skipping employee update due to missing id");
                outcomes.push(BulkUpdateOutcome {
                    id: MISSING_ID_SENTINEL,
                    success: false,
                });
                continue;
            };

            let success = self.update(id, record).await;
            outcomes.push(BulkUpdateOutcome { id, success });
        }

        outcomes
    }

    // ── Credential issuance ─────────────────────────────────────────

    /// Issue a one-time access credential for the employee.
    ///
    /// The store both generates the credential and records issuance state;
    /// a non-positive result code means no credential was produced. The
    /// plaintext password is handed to the caller exactly once and never
    /// logged here.
    pub async fn invite(&self, employee_id: EmployeeId) -> RegistryResult<InviteCredential> {
        let outcome = self.store.issue_invite(employee_id).await?;
        if outcome.code <= 0 {
            tracing::warn!(employee_id, code = outcome.code, "Invitation rejected by store");
            return Err(RegistryError::InvitationFailed(outcome.code));
        }
        outcome.credential.ok_or_else(|| {
            RegistryError::StoreUnavailable(
                "store reported success without a credential".to_string(),
            )
        })
    }

    // ── Lookup catalogs ─────────────────────────────────────────────

    pub async fn designations(&self) -> Vec<String> {
        self.catalog(self.store.designations().await, "designations")
    }

    pub async fn locations(&self) -> Vec<String> {
        self.catalog(self.store.locations().await, "locations")
    }

    pub async fn billable_statuses(&self) -> Vec<String> {
        self.catalog(self.store.billable_statuses().await, "billable statuses")
    }

    pub async fn skills(&self) -> Vec<String> {
        self.catalog(self.store.skills().await, "skills")
    }

    pub async fn projects(&self) -> Vec<String> {
        self.catalog(self.store.projects().await, "projects")
    }

    /// Add a skill to the catalog; failures are logged and swallowed
    pub async fn add_skill_if_missing(&self, skill: &str) {
        if let Err(e) = self.store.add_skill_if_missing(skill).await {
            tracing::error!(skill, error = %e, "Failed to add skill to catalog");
        }
    }

    fn catalog(
        &self,
        result: Result<Vec<String>, crate::db::store::StoreError>,
        what: &str,
    ) -> Vec<String> {
        match result {
            Ok(values) => values,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch {what}, returning empty list");
                Vec::new()
            }
        }
    }
}
