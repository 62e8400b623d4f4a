//! Core domain entities.
//!
//! - [`Link`] - A short code mapped to a target URL, with click metadata
//! - [`NewLink`] - Input for creating a link

pub mod link;

pub use link::{Link, NewLink};
