//! 员工注册表引擎 - 查询、批量变更与邀请
//!
//! The engine sits between the HTTP façade and the store gateway. It
//! carries the query pipeline (filter, sort, page), the set-oriented bulk
//! mutations, the legacy per-record path and credential issuance.

pub mod engine;
pub mod error;
pub mod filter;

pub use engine::{MISSING_ID_SENTINEL, RegistryService};
pub use error::{RegistryError, RegistryResult};
