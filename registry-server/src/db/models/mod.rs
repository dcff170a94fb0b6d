//! Database Models
//!
//! Plain structured values exchanged between the HTTP layer, the registry
//! engine and the store gateway. No framework types leak through here.

pub mod employee;
pub mod user;

pub use employee::{
    BulkUpdateOutcome, BulkUpdateRequest, Employee, EmployeeId, Filter, InviteCredential,
    InviteOutcome, PagedEmployeeRequest, PagedEmployeeResult,
};
pub use user::{AppUser, LoginRequest, LoginResponse, RegisterRequest};
