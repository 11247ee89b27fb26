//! Entity models, request DTOs and response shapes of the management API.
//!
//! Read models mirror what the backend returns (camelCase JSON). Nested
//! relation fields (`supplier`, `product_model`, ...) are denormalized copies
//! for display and are never sent back. Write-only fields such as passwords
//! and API secrets exist only on the create/update DTOs.

pub mod api_credential;
pub mod auth;
pub mod dashboard;
pub mod pallet;
pub mod product;
pub mod product_line;
pub mod product_model;
pub mod production_plan;
pub mod query;
pub mod report;
pub mod response;
pub mod supplier;
pub mod user;
