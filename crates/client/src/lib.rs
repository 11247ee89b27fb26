//! HTTP client for the quality-management backend.
//!
//! [`http::HttpClient`] carries the bearer token from the shared
//! [`session::Session`] and turns a 401 into a logout plus a redirect to the
//! login route. [`management::ManagementApi`] exposes one typed
//! [`resource::ResourceClient`] per entity and the report, dashboard and
//! login endpoints.

pub mod error;
pub mod http;
pub mod management;
pub mod navigation;
pub mod resource;
pub mod session;

pub use error::ApiError;
pub use http::HttpClient;
pub use management::ManagementApi;
pub use navigation::{Navigator, Route};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
