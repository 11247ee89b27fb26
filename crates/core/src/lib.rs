//! Shared primitives for the quality-management console.
//!
//! Zero internal dependencies: identifiers, timestamps, pagination, filter
//! helpers and the domain error type used by every other crate.

pub mod datetime;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod types;
