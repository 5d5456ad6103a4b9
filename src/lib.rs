//! # Claims Inspector
//!
//! Authorization facts from an already-validated token's claim set: the
//! subject, realm roles, account roles and OAuth2 scopes of Keycloak-style
//! access tokens.
//!
//! Token signature and expiry checks happen upstream; this crate trusts its input.
//!
//! ## Features
//!
//! - `axum` (default): role and scope gate layers plus request extractors

pub mod claims;
pub mod config;
pub mod error;

#[cfg(feature = "axum")]
pub mod auth;

#[cfg(feature = "axum")]
pub mod axum_integration;

pub use claims::{ClaimSet, ClaimsInspector};
pub use config::{load_config, InspectorConfig, InspectorSettings};
pub use error::{ClaimsError, Result};
