//! Validation and generation helpers shared by the service and the HTTP layer.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Target URL validation
//!
//! Both the request DTOs and [`crate::application::services::LinkService`]
//! call the same predicates, so client-facing and server-side checks agree.

pub mod code_generator;
pub mod url_validator;

pub use code_generator::{generate_code, is_valid_code};
pub use url_validator::is_valid_url;
