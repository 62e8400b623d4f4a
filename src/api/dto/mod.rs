//! Data Transfer Objects for API requests and responses.
//!
//! JSON field names are camelCase. Request DTOs are checked with `validator`
//! using the same predicates as the service layer.

pub mod health;
pub mod link;
