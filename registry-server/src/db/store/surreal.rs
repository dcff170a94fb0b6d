//! SurrealDB Store Gateway
//!
//! Production [`EmployeeStore`] implementation over the embedded database.
//! Every access is a parameterized statement; record keys are numeric ids
//! drawn from per-table sequence rows (`seq:employee`, `seq:app_user`).

use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{EmployeeStore, StoreError, StoreResult};
use crate::db::models::{
    AppUser, BulkUpdateRequest, Employee, EmployeeId, InviteCredential, InviteOutcome,
};

const EMPLOYEE_TABLE: &str = "employee";
const USER_TABLE: &str = "app_user";

/// Characters used for generated invite passwords
const PASSWORD_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*-_=+";
const PASSWORD_LEN: usize = 16;

#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Db>,
}

/// Employee row as stored (record key is `employee:<emp_id>`)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmployeeRow {
    emp_id: i64,
    name: Option<String>,
    designation: Option<String>,
    reporting_to: Option<String>,
    billable_status: Option<String>,
    skills: Option<String>,
    project_allocation: Option<String>,
    location: Option<String>,
    email: Option<String>,
    join_date: Option<String>,
    remarks: Option<String>,
}

/// Employee row with an explicit record id, for set-oriented inserts
#[derive(Debug, Serialize)]
struct NewEmployeeRow {
    id: RecordId,
    #[serde(flatten)]
    row: EmployeeRow,
}

/// Application user row as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    hash_pass: String,
    employee_id: Option<i64>,
}

impl EmployeeRow {
    fn from_record(record: Employee, emp_id: i64) -> Self {
        Self {
            emp_id,
            name: record.name,
            designation: record.designation,
            reporting_to: record.reporting_to,
            billable_status: record.billable_status,
            skills: record.skills,
            project_allocation: record.project_allocation,
            location: record.location,
            email: record.email,
            join_date: record.join_date,
            remarks: record.remarks,
        }
    }

    fn into_record(self) -> Employee {
        Employee {
            id: Some(self.emp_id),
            name: self.name,
            designation: self.designation,
            reporting_to: self.reporting_to,
            billable_status: self.billable_status,
            skills: self.skills,
            project_allocation: self.project_allocation,
            location: self.location,
            email: self.email,
            join_date: self.join_date,
            remarks: self.remarks,
        }
    }
}

impl UserRow {
    fn into_user(self) -> AppUser {
        AppUser {
            id: Some(self.user_id),
            username: self.username,
            email: self.email,
            hash_pass: self.hash_pass,
            employee_id: self.employee_id,
        }
    }
}

/// Map a database error, recognizing unique-index violations
fn map_db_err(err: surrealdb::Error) -> StoreError {
    let msg = err.to_string();
    if msg.contains("already contains") {
        StoreError::Duplicate(msg)
    } else {
        StoreError::Unavailable(msg)
    }
}

/// Generate a one-time invite password from printable characters
fn generate_invite_password() -> StoreResult<String> {
    let rng = SystemRandom::new();
    let mut password = String::with_capacity(PASSWORD_LEN);

    for _ in 0..PASSWORD_LEN {
        let mut byte = [0u8; 1];
        rng.fill(&mut byte).map_err(|_| {
            StoreError::Unavailable("Failed to generate secure random password".to_string())
        })?;
        let idx = (byte[0] as usize) % PASSWORD_CHARS.len();
        // PASSWORD_CHARS is ASCII, indexing by char is safe
        password.push(PASSWORD_CHARS.as_bytes()[idx] as char);
    }

    Ok(password)
}

impl SurrealStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Reserve `count` consecutive ids from the table's sequence row,
    /// returning the first one
    async fn reserve_ids(&self, table: &str, count: i64) -> StoreResult<i64> {
        let mut result = self
            .db
            .query("UPSERT type::thing('seq', $table) SET value = (value OR 0) + $n RETURN VALUE value")
            .bind(("table", table.to_string()))
            .bind(("n", count))
            .await
            .map_err(map_db_err)?;
        let last: Option<i64> = result.take(0).map_err(map_db_err)?;
        let last = last
            .ok_or_else(|| StoreError::Unavailable("id sequence returned nothing".to_string()))?;
        Ok(last - count + 1)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<UserRow>> {
        let mut result = self
            .db
            .query("SELECT * FROM app_user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await
            .map_err(map_db_err)?;
        let user: Option<UserRow> = result.take(0).map_err(map_db_err)?;
        Ok(user)
    }

    async fn find_user_by_employee(&self, employee_id: i64) -> StoreResult<Option<UserRow>> {
        let mut result = self
            .db
            .query("SELECT * FROM app_user WHERE employee_id = $employee_id LIMIT 1")
            .bind(("employee_id", employee_id))
            .await
            .map_err(map_db_err)?;
        let user: Option<UserRow> = result.take(0).map_err(map_db_err)?;
        Ok(user)
    }

    /// Pick a username for an invited employee: the email local part when
    /// available, suffixed with the employee id on collision
    async fn pick_invite_username(&self, employee: &Employee, id: i64) -> StoreResult<String> {
        let base = employee
            .email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("emp{id}"));

        if self.find_user_by_username(&base).await?.is_none() {
            return Ok(base);
        }
        Ok(format!("{base}{id}"))
    }

    async fn catalog_values(&self, table: &str) -> StoreResult<Vec<String>> {
        let mut result = self
            .db
            .query("SELECT VALUE name FROM type::table($table) ORDER BY name")
            .bind(("table", table.to_string()))
            .await
            .map_err(map_db_err)?;
        let values: Vec<String> = result.take(0).map_err(map_db_err)?;
        Ok(values)
    }
}

#[async_trait::async_trait]
impl EmployeeStore for SurrealStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Employee>> {
        let mut result = self
            .db
            .query("SELECT * FROM employee ORDER BY emp_id")
            .await
            .map_err(map_db_err)?;
        let rows: Vec<EmployeeRow> = result.take(0).map_err(map_db_err)?;
        Ok(rows.into_iter().map(EmployeeRow::into_record).collect())
    }

    async fn fetch_one(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        let mut result = self
            .db
            .query("SELECT * FROM employee WHERE emp_id = $id LIMIT 1")
            .bind(("id", id))
            .await
            .map_err(map_db_err)?;
        let row: Option<EmployeeRow> = result.take(0).map_err(map_db_err)?;
        Ok(row.map(EmployeeRow::into_record))
    }

    async fn fetch_by_ids(&self, ids: &[EmployeeId]) -> StoreResult<Vec<Employee>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut result = self
            .db
            .query("SELECT * FROM employee WHERE emp_id IN $ids ORDER BY emp_id")
            .bind(("ids", ids.to_vec()))
            .await
            .map_err(map_db_err)?;
        let rows: Vec<EmployeeRow> = result.take(0).map_err(map_db_err)?;
        Ok(rows.into_iter().map(EmployeeRow::into_record).collect())
    }

    async fn insert(&self, record: Employee) -> StoreResult<Employee> {
        // Duplicate email check; emails are optional but unique when present
        if let Some(ref email) = record.email {
            let mut result = self
                .db
                .query("SELECT emp_id FROM employee WHERE email = $email LIMIT 1")
                .bind(("email", email.clone()))
                .await
                .map_err(map_db_err)?;
            let existing: Option<i64> = result
                .take::<Vec<i64>>((0, "emp_id"))
                .map_err(map_db_err)?
                .into_iter()
                .next();
            if existing.is_some() {
                return Err(StoreError::Duplicate(format!(
                    "Email '{email}' already exists"
                )));
            }
        }

        let id = self.reserve_ids(EMPLOYEE_TABLE, 1).await?;
        let row = EmployeeRow::from_record(record, id);

        let mut result = self
            .db
            .query("CREATE type::thing('employee', $id) CONTENT $data RETURN AFTER")
            .bind(("id", id))
            .bind(("data", row))
            .await
            .map_err(map_db_err)?;
        let created: Option<EmployeeRow> = result.take(0).map_err(map_db_err)?;
        created
            .map(EmployeeRow::into_record)
            .ok_or_else(|| StoreError::Unavailable("Failed to create employee".to_string()))
    }

    async fn update_one(&self, id: EmployeeId, record: Employee) -> StoreResult<bool> {
        let row = EmployeeRow::from_record(record, id);
        let mut result = self
            .db
            .query("UPDATE type::thing('employee', $id) CONTENT $data RETURN AFTER")
            .bind(("id", id))
            .bind(("data", row))
            .await
            .map_err(map_db_err)?;
        let updated: Option<EmployeeRow> = result.take(0).map_err(map_db_err)?;
        Ok(updated.is_some())
    }

    async fn delete_one(&self, id: EmployeeId) -> StoreResult<bool> {
        let mut result = self
            .db
            .query("DELETE type::thing('employee', $id) RETURN BEFORE")
            .bind(("id", id))
            .await
            .map_err(map_db_err)?;
        let removed: Option<EmployeeRow> = result.take(0).map_err(map_db_err)?;
        Ok(removed.is_some())
    }

    async fn bulk_update_set(&self, request: &BulkUpdateRequest) -> StoreResult<()> {
        // One set-oriented statement: the id set and the sparse field group
        // travel as parameters, and the store applies them in a single pass.
        self.db
            .query(
                r#"UPDATE employee SET
                    designation = IF $has_designation THEN $designation ELSE designation END,
                    reporting_to = IF $has_reporting_to THEN $reporting_to ELSE reporting_to END,
                    billable_status = IF $has_billable_status THEN $billable_status ELSE billable_status END,
                    skills = IF $has_skills THEN $skills ELSE skills END,
                    project_allocation = IF $has_project_allocation THEN $project_allocation ELSE project_allocation END,
                    location = IF $has_location THEN $location ELSE location END,
                    join_date = IF $has_join_date THEN $join_date ELSE join_date END
                WHERE emp_id IN $ids"#,
            )
            .bind(("ids", request.employee_ids.clone()))
            .bind(("has_designation", request.designation.is_some()))
            .bind(("designation", request.designation.clone()))
            .bind(("has_reporting_to", request.reporting_to.is_some()))
            .bind(("reporting_to", request.reporting_to.clone()))
            .bind(("has_billable_status", request.billable_status.is_some()))
            .bind(("billable_status", request.billable_status.clone()))
            .bind(("has_skills", request.skills.is_some()))
            .bind(("skills", request.skills.clone()))
            .bind(("has_project_allocation", request.project_allocation.is_some()))
            .bind(("project_allocation", request.project_allocation.clone()))
            .bind(("has_location", request.location.is_some()))
            .bind(("location", request.location.clone()))
            .bind(("has_join_date", request.join_date.is_some()))
            .bind(("join_date", request.join_date.clone()))
            .await
            .map_err(map_db_err)?
            .check()
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn bulk_insert_set(&self, records: Vec<Employee>) -> StoreResult<()> {
        // Duplicate email pre-check: within the batch itself, then against
        // the existing set
        let emails: Vec<String> = records.iter().filter_map(|r| r.email.clone()).collect();
        let mut seen = std::collections::HashSet::new();
        for email in &emails {
            if !seen.insert(email) {
                return Err(StoreError::Duplicate(format!(
                    "Email '{email}' appears more than once in the batch"
                )));
            }
        }
        if !emails.is_empty() {
            let mut result = self
                .db
                .query("SELECT VALUE email FROM employee WHERE email IN $emails")
                .bind(("emails", emails))
                .await
                .map_err(map_db_err)?;
            let taken: Vec<String> = result.take(0).map_err(map_db_err)?;
            if let Some(email) = taken.first() {
                return Err(StoreError::Duplicate(format!(
                    "Email '{email}' already exists"
                )));
            }
        }

        let count = records.len() as i64;
        let first_id = self.reserve_ids(EMPLOYEE_TABLE, count).await?;

        let rows: Vec<NewEmployeeRow> = records
            .into_iter()
            .enumerate()
            .map(|(offset, record)| {
                let emp_id = first_id + offset as i64;
                NewEmployeeRow {
                    id: RecordId::from_table_key(EMPLOYEE_TABLE, emp_id),
                    row: EmployeeRow::from_record(record, emp_id),
                }
            })
            .collect();

        // Whole batch in one set-oriented insert
        self.db
            .query("INSERT INTO employee $rows")
            .bind(("rows", rows))
            .await
            .map_err(map_db_err)?
            .check()
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn issue_invite(&self, id: EmployeeId) -> StoreResult<InviteOutcome> {
        let Some(employee) = self.fetch_one(id).await? else {
            return Ok(InviteOutcome {
                code: -1,
                credential: None,
            });
        };

        // The store is the source of truth for issuance state
        if self.find_user_by_employee(id).await?.is_some() {
            return Ok(InviteOutcome {
                code: 0,
                credential: None,
            });
        }

        let username = self.pick_invite_username(&employee, id).await?;
        let password = generate_invite_password()?;
        let hash_pass = AppUser::hash_password(&password)
            .map_err(|e| StoreError::Unavailable(format!("Failed to hash password: {e}")))?;

        let user_id = self.reserve_ids(USER_TABLE, 1).await?;
        let row = UserRow {
            user_id,
            username: username.clone(),
            email: employee.email.clone().unwrap_or_default(),
            hash_pass,
            employee_id: Some(id),
        };

        self.db
            .query("CREATE type::thing('app_user', $id) CONTENT $data")
            .bind(("id", user_id))
            .bind(("data", row))
            .await
            .map_err(map_db_err)?
            .check()
            .map_err(map_db_err)?;

        Ok(InviteOutcome {
            code: user_id,
            credential: Some(InviteCredential {
                username,
                password,
                user_id,
            }),
        })
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<AppUser>> {
        let mut result = self
            .db
            .query("SELECT * FROM app_user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await
            .map_err(map_db_err)?;
        let user: Option<UserRow> = result.take(0).map_err(map_db_err)?;
        Ok(user.map(UserRow::into_user))
    }

    async fn insert_user(&self, user: AppUser) -> StoreResult<AppUser> {
        if self.find_user_by_email(&user.email).await?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "Email '{}' already exists",
                user.email
            )));
        }
        if self.find_user_by_username(&user.username).await?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let user_id = self.reserve_ids(USER_TABLE, 1).await?;
        let row = UserRow {
            user_id,
            username: user.username,
            email: user.email,
            hash_pass: user.hash_pass,
            employee_id: user.employee_id,
        };

        let mut result = self
            .db
            .query("CREATE type::thing('app_user', $id) CONTENT $data RETURN AFTER")
            .bind(("id", user_id))
            .bind(("data", row))
            .await
            .map_err(map_db_err)?;
        let created: Option<UserRow> = result.take(0).map_err(map_db_err)?;
        created
            .map(UserRow::into_user)
            .ok_or_else(|| StoreError::Unavailable("Failed to create user".to_string()))
    }

    async fn designations(&self) -> StoreResult<Vec<String>> {
        self.catalog_values("designation").await
    }

    async fn locations(&self) -> StoreResult<Vec<String>> {
        self.catalog_values("location").await
    }

    async fn billable_statuses(&self) -> StoreResult<Vec<String>> {
        self.catalog_values("billable_status").await
    }

    async fn skills(&self) -> StoreResult<Vec<String>> {
        self.catalog_values("skill").await
    }

    async fn projects(&self) -> StoreResult<Vec<String>> {
        self.catalog_values("project").await
    }

    async fn add_skill_if_missing(&self, skill: &str) -> StoreResult<()> {
        let name = skill.trim().to_string();
        let mut result = self
            .db
            .query("SELECT VALUE name FROM skill WHERE name = $name LIMIT 1")
            .bind(("name", name.clone()))
            .await
            .map_err(map_db_err)?;
        let existing: Vec<String> = result.take(0).map_err(map_db_err)?;
        if !existing.is_empty() {
            return Ok(());
        }

        self.db
            .query("CREATE skill SET name = $name")
            .bind(("name", name))
            .await
            .map_err(map_db_err)?
            .check()
            .map_err(map_db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_store() -> SurrealStore {
        let service = DbService::in_memory()
            .await
            .expect("Failed to open in-memory database");
        SurrealStore::new(service.db)
    }

    fn sample(name: &str, email: &str) -> Employee {
        Employee {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            designation: Some("Engineer".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = test_store().await;

        let a = store.insert(sample("Ana", "ana@example.com")).await.unwrap();
        let b = store.insert(sample("Ben", "ben@example.com")).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = test_store().await;

        store.insert(sample("Ana", "ana@example.com")).await.unwrap();
        let err = store
            .insert(sample("Another", "ana@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_one_missing_record_is_false() {
        let store = test_store().await;
        let updated = store.update_one(99, sample("Ghost", "g@example.com")).await.unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_bulk_update_set_touches_only_named_fields() {
        let store = test_store().await;
        let a = store.insert(sample("Ana", "ana@example.com")).await.unwrap();
        let b = store.insert(sample("Ben", "ben@example.com")).await.unwrap();

        let request = BulkUpdateRequest {
            employee_ids: vec![a.id.unwrap(), b.id.unwrap()],
            location: Some("Lisbon".to_string()),
            ..Default::default()
        };
        store.bulk_update_set(&request).await.unwrap();

        let all = store.fetch_all().await.unwrap();
        for emp in &all {
            assert_eq!(emp.location.as_deref(), Some("Lisbon"));
            assert_eq!(emp.designation.as_deref(), Some("Engineer"));
        }
    }

    #[tokio::test]
    async fn test_bulk_insert_set_inserts_whole_batch() {
        let store = test_store().await;

        let batch = vec![
            sample("Ana", "ana@example.com"),
            sample("Ben", "ben@example.com"),
            sample("Cam", "cam@example.com"),
        ];
        store.bulk_insert_set(batch).await.unwrap();

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 3);
        let ids: Vec<i64> = all.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_bulk_insert_set_rejects_repeated_email_within_batch() {
        let store = test_store().await;

        let batch = vec![
            sample("Ana", "ana@example.com"),
            sample("Ben", "ben@example.com"),
            sample("Impostor", "ana@example.com"),
        ];
        let err = store.bulk_insert_set(batch).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Rejected before the write: nothing from the batch landed
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_insert_set_rejects_email_taken_by_existing_record() {
        let store = test_store().await;
        store.insert(sample("Ana", "ana@example.com")).await.unwrap();

        let batch = vec![sample("Impostor", "ana@example.com")];
        let err = store.bulk_insert_set(batch).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_issue_invite_codes() {
        let store = test_store().await;
        let emp = store.insert(sample("Ana", "ana@example.com")).await.unwrap();
        let id = emp.id.unwrap();

        // Unknown employee
        let missing = store.issue_invite(999).await.unwrap();
        assert_eq!(missing.code, -1);
        assert!(missing.credential.is_none());

        // First invite succeeds with the new user id
        let first = store.issue_invite(id).await.unwrap();
        assert!(first.code > 0);
        let credential = first.credential.expect("credential on success");
        assert_eq!(credential.username, "ana");
        assert_eq!(credential.password.len(), PASSWORD_LEN);

        // Issuance state lives in the store: second invite reports code 0
        let second = store.issue_invite(id).await.unwrap();
        assert_eq!(second.code, 0);
        assert!(second.credential.is_none());

        // Invited credential can be found for login
        let user = store
            .find_user_by_email("ana@example.com")
            .await
            .unwrap()
            .expect("invited user exists");
        assert!(user.verify_password(&credential.password).unwrap());
    }

    #[tokio::test]
    async fn test_skill_catalog_is_idempotent() {
        let store = test_store().await;

        store.add_skill_if_missing("rust").await.unwrap();
        store.add_skill_if_missing(" rust ").await.unwrap();
        store.add_skill_if_missing("sql").await.unwrap();

        let skills = store.skills().await.unwrap();
        assert_eq!(skills, vec!["rust".to_string(), "sql".to_string()]);
    }
}
