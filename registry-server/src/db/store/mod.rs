//! Record Store Gateway
//!
//! The registry engine never talks to the database directly; it goes through
//! the [`EmployeeStore`] trait so the backing store can be swapped
//! (embedded SurrealDB in production, an in-memory store in tests).

pub mod surreal;

#[cfg(test)]
pub mod memory;

pub use surreal::SurrealStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::{AppUser, BulkUpdateRequest, Employee, EmployeeId, InviteOutcome};

/// Store-level error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Gateway contract the registry engine depends on
///
/// Reads return raw record sets; writes are parameterized statements. The
/// two `bulk_*_set` operations must each issue a single set-oriented write,
/// inheriting whatever atomicity the store provides for one statement.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    // ── Employee records ────────────────────────────────────────────

    /// Fetch the complete current record set
    async fn fetch_all(&self) -> StoreResult<Vec<Employee>>;

    /// Fetch one record by id
    async fn fetch_one(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    /// Fetch the records whose ids are in the given set
    async fn fetch_by_ids(&self, ids: &[EmployeeId]) -> StoreResult<Vec<Employee>>;

    /// Insert one record, returning it with the store-assigned id.
    /// Fails with [`StoreError::Duplicate`] on a unique-email violation.
    async fn insert(&self, record: Employee) -> StoreResult<Employee>;

    /// Replace one record in place; `false` when the id has no record
    async fn update_one(&self, id: EmployeeId, record: Employee) -> StoreResult<bool>;

    /// Delete one record; `false` when the id has no record
    async fn delete_one(&self, id: EmployeeId) -> StoreResult<bool>;

    /// Apply the sparse field set to every record in the id set,
    /// as one set-oriented write
    async fn bulk_update_set(&self, request: &BulkUpdateRequest) -> StoreResult<()>;

    /// Insert the whole sequence as one set-oriented write
    async fn bulk_insert_set(&self, records: Vec<Employee>) -> StoreResult<()>;

    // ── Credential issuance ─────────────────────────────────────────

    /// Generate a one-time credential for the employee and record issuance.
    /// The signed `code` in the outcome carries the business result;
    /// a credential is present only when the code is positive.
    async fn issue_invite(&self, id: EmployeeId) -> StoreResult<InviteOutcome>;

    // ── Application users ───────────────────────────────────────────

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<AppUser>>;

    /// Insert a login account; fails with [`StoreError::Duplicate`] when the
    /// email or username is taken
    async fn insert_user(&self, user: AppUser) -> StoreResult<AppUser>;

    // ── Lookup catalogs ─────────────────────────────────────────────

    async fn designations(&self) -> StoreResult<Vec<String>>;
    async fn locations(&self) -> StoreResult<Vec<String>>;
    async fn billable_statuses(&self) -> StoreResult<Vec<String>>;
    async fn skills(&self) -> StoreResult<Vec<String>>;
    async fn projects(&self) -> StoreResult<Vec<String>>;

    /// Add a skill to the catalog unless it is already present
    async fn add_skill_if_missing(&self, skill: &str) -> StoreResult<()>;
}
