//! Role, scope and subject extraction from decoded token claims
//!
//! The claims are assumed to be authenticated already (signature and expiry
//! checked upstream). Nothing here validates a token.
//!
//! # Example
//!
//! ```rust
//! use claims_inspector::claims::{parse_claim_set, ClaimsInspector};
//!
//! let claims = parse_claim_set(r#"{
//!     "sub": "user-123",
//!     "scope": "read write",
//!     "realm_access": { "roles": ["admin"] }
//! }"#).unwrap();
//!
//! let inspector = ClaimsInspector::new(&claims);
//! assert_eq!(inspector.user_id().unwrap(), "user-123");
//! assert!(inspector.is_in_realm_role("admin"));
//! assert!(inspector.token_has_scope("write"));
//! ```

pub mod inspector;
pub mod types;

pub use inspector::ClaimsInspector;
pub use types::{parse_claim_set, ClaimSet, ClientAccess, RealmAccess, ResourceAccess};
