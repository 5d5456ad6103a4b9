//! Role and scope gates for axum applications
//!
//! An upstream authenticator validates the bearer token and inserts the decoded
//! [`ClaimSet`](crate::ClaimSet) into the request extensions. The layers here build a
//! [`ClaimsInspector`](crate::ClaimsInspector) from it and reject the request
//! when the required roles or scopes are absent.
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::get, Router};
//! use claims_inspector::auth::{RequireRealmRole, RequireScope};
//!
//! let app = Router::new()
//!     .route("/admin", get(admin_handler))
//!     .layer(RequireScope::new(vec!["admin".to_string()]))
//!     .layer(RequireRealmRole::new(vec!["admin".to_string()]));
//! ```

pub mod error;
pub mod middleware;

pub use error::AuthorizationError;
pub use middleware::{RequireAccountRole, RequireRealmRole, RequireScope};
