//! In-Memory Store
//!
//! Test double for [`EmployeeStore`] with failure injection and a write-call
//! counter, so engine tests can assert both behavior and store traffic.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{EmployeeStore, StoreError, StoreResult};
use crate::db::models::{
    AppUser, BulkUpdateRequest, Employee, EmployeeId, InviteCredential, InviteOutcome,
};

#[derive(Default)]
struct Inner {
    employees: BTreeMap<EmployeeId, Employee>,
    users: Vec<AppUser>,
    skills: Vec<String>,
    next_employee_id: EmployeeId,
    next_user_id: i64,
}

/// In-memory [`EmployeeStore`] for tests
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_calls: AtomicUsize,
    forced_invite_code: Mutex<Option<i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_employee_id: 1,
                next_user_id: 1,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Seed the store with records that already carry ids
    pub fn with_records(records: Vec<Employee>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().expect("memory store poisoned");
            for record in records {
                let id = record.id.expect("seed records must carry ids");
                inner.next_employee_id = inner.next_employee_id.max(id + 1);
                inner.employees.insert(id, record);
            }
        }
        store
    }

    /// Make every read fail with [`StoreError::Unavailable`]
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Make every write fail with [`StoreError::Unavailable`]
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Force the next invite outcome to carry the given code
    pub fn force_invite_code(&self, code: i64) {
        *self.forced_invite_code.lock().expect("memory store poisoned") = Some(code);
    }

    /// Number of write statements the store has received
    pub fn write_call_count(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn record(&self, id: EmployeeId) -> Option<Employee> {
        self.inner
            .lock()
            .expect("memory store poisoned")
            .employees
            .get(&id)
            .cloned()
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn apply_sparse(record: &mut Employee, request: &BulkUpdateRequest) {
    if let Some(ref v) = request.designation {
        record.designation = Some(v.clone());
    }
    if let Some(ref v) = request.reporting_to {
        record.reporting_to = Some(v.clone());
    }
    if let Some(ref v) = request.billable_status {
        record.billable_status = Some(v.clone());
    }
    if let Some(ref v) = request.skills {
        record.skills = Some(v.clone());
    }
    if let Some(ref v) = request.project_allocation {
        record.project_allocation = Some(v.clone());
    }
    if let Some(ref v) = request.location {
        record.location = Some(v.clone());
    }
    if let Some(ref v) = request.join_date {
        record.join_date = Some(v.clone());
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Employee>> {
        self.check_read()?;
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.employees.values().cloned().collect())
    }

    async fn fetch_one(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        self.check_read()?;
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.employees.get(&id).cloned())
    }

    async fn fetch_by_ids(&self, ids: &[EmployeeId]) -> StoreResult<Vec<Employee>> {
        self.check_read()?;
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .employees
            .values()
            .filter(|e| e.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn insert(&self, mut record: Employee) -> StoreResult<Employee> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        if let Some(ref email) = record.email
            && inner.employees.values().any(|e| e.email.as_ref() == Some(email))
        {
            return Err(StoreError::Duplicate(format!(
                "Email '{email}' already exists"
            )));
        }
        let id = inner.next_employee_id;
        inner.next_employee_id += 1;
        record.id = Some(id);
        inner.employees.insert(id, record.clone());
        Ok(record)
    }

    async fn update_one(&self, id: EmployeeId, mut record: Employee) -> StoreResult<bool> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        if !inner.employees.contains_key(&id) {
            return Ok(false);
        }
        record.id = Some(id);
        inner.employees.insert(id, record);
        Ok(true)
    }

    async fn delete_one(&self, id: EmployeeId) -> StoreResult<bool> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.employees.remove(&id).is_some())
    }

    async fn bulk_update_set(&self, request: &BulkUpdateRequest) -> StoreResult<()> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        for id in &request.employee_ids {
            if let Some(record) = inner.employees.get_mut(id) {
                apply_sparse(record, request);
            }
        }
        Ok(())
    }

    async fn bulk_insert_set(&self, records: Vec<Employee>) -> StoreResult<()> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if let Some(ref email) = record.email {
                let taken = !seen.insert(email.clone())
                    || inner.employees.values().any(|e| e.email.as_ref() == Some(email));
                if taken {
                    return Err(StoreError::Duplicate(format!(
                        "Email '{email}' already exists"
                    )));
                }
            }
        }
        for mut record in records {
            let id = inner.next_employee_id;
            inner.next_employee_id += 1;
            record.id = Some(id);
            inner.employees.insert(id, record);
        }
        Ok(())
    }

    async fn issue_invite(&self, id: EmployeeId) -> StoreResult<InviteOutcome> {
        self.check_write()?;

        if let Some(code) = self
            .forced_invite_code
            .lock()
            .expect("memory store poisoned")
            .take()
        {
            let credential = (code > 0).then(|| InviteCredential {
                username: format!("user{code}"),
                password: "forced-password".to_string(),
                user_id: code,
            });
            return Ok(InviteOutcome { code, credential });
        }

        let mut inner = self.inner.lock().expect("memory store poisoned");
        let Some(employee) = inner.employees.get(&id).cloned() else {
            return Ok(InviteOutcome {
                code: -1,
                credential: None,
            });
        };
        if inner.users.iter().any(|u| u.employee_id == Some(id)) {
            return Ok(InviteOutcome {
                code: 0,
                credential: None,
            });
        }

        let user_id = inner.next_user_id;
        inner.next_user_id += 1;
        let username = format!("emp{id}");
        let password = format!("one-time-{user_id}");
        inner.users.push(AppUser {
            id: Some(user_id),
            username: username.clone(),
            email: employee.email.unwrap_or_default(),
            hash_pass: String::new(),
            employee_id: Some(id),
        });

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
        self.check_read()?;
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, mut user: AppUser) -> StoreResult<AppUser> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        if inner
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(StoreError::Duplicate(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        let user_id = inner.next_user_id;
        inner.next_user_id += 1;
        user.id = Some(user_id);
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn designations(&self) -> StoreResult<Vec<String>> {
        self.check_read()?;
        Ok(vec!["Engineer".to_string(), "Manager".to_string()])
    }

    async fn locations(&self) -> StoreResult<Vec<String>> {
        self.check_read()?;
        Ok(vec!["Lisbon".to_string(), "Porto".to_string()])
    }

    async fn billable_statuses(&self) -> StoreResult<Vec<String>> {
        self.check_read()?;
        Ok(vec!["Billable".to_string(), "Non-Billable".to_string()])
    }

    async fn skills(&self) -> StoreResult<Vec<String>> {
        self.check_read()?;
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.skills.clone())
    }

    async fn projects(&self) -> StoreResult<Vec<String>> {
        self.check_read()?;
        Ok(vec!["Atlas".to_string()])
    }

    async fn add_skill_if_missing(&self, skill: &str) -> StoreResult<()> {
        self.check_write()?;
        let mut inner = self.inner.lock().expect("memory store poisoned");
        let name = skill.trim().to_string();
        if !inner.skills.contains(&name) {
            inner.skills.push(name);
        }
        Ok(())
    }
}
