//! Database Module
//!
//! Opens the embedded SurrealDB instance and defines the tables the
//! registry uses. Access from the rest of the application goes through
//! the [`store::EmployeeStore`] gateway.

pub mod models;
pub mod store;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "registry";
const DATABASE: &str = "registry";

/// Database service — owns the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let service = Self::prepare(db).await?;
        tracing::info!("Database connection established (SurrealDB RocksDB at {db_path})");
        Ok(service)
    }

    /// Open a fresh in-memory database (tests)
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Table definitions; catalog tables are provisioned lazily
        db.query(
            r#"
            DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS app_user SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS skill SCHEMALESS;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        Ok(Self { db })
    }
}
