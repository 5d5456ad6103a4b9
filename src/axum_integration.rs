//! Axum extractors for decoded token claims
//!
//! Both extractors read the [`ClaimSet`] that an upstream authenticator inserted
//! into the request extensions:
//! - [`ClaimSetExtractor`] hands out the raw claim set
//! - [`AuthenticatedUser`] additionally requires a usable subject
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{routing::get, Router};
//! use claims_inspector::axum_integration::ClaimSetExtractor;
//!
//! async fn handler(claims: ClaimSetExtractor) -> String {
//!     let inspector = claims.inspector();
//!     format!("admin: {}", inspector.is_in_realm_role("admin"))
//! }
//!
//! let app = Router::new().route("/whoami", get(handler));
//! ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use std::ops::Deref;

use crate::auth::AuthorizationError;
use crate::claims::{ClaimSet, ClaimsInspector};

/// Axum extractor for the decoded claim set
#[derive(Debug, Clone)]
pub struct ClaimSetExtractor(pub ClaimSet);

impl Deref for ClaimSetExtractor {
    type Target = ClaimSet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ClaimSet> for ClaimSetExtractor {
    fn from(claims: ClaimSet) -> Self {
        Self(claims)
    }
}

impl ClaimSetExtractor {
    /// Build an inspector over the extracted claims
    pub fn inspector(&self) -> ClaimsInspector<'_> {
        ClaimsInspector::new(&self.0)
    }

    pub fn into_inner(self) -> ClaimSet {
        self.0
    }
}

impl<S> FromRequestParts<S> for ClaimSetExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ClaimSet>()
            .cloned()
            .map(Self)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Axum extractor for a request whose claims carry a string subject
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub claims: ClaimSet,
}

impl AuthenticatedUser {
    pub fn inspector(&self) -> ClaimsInspector<'_> {
        ClaimsInspector::new(&self.claims)
    }
}

impl TryFrom<ClaimSet> for AuthenticatedUser {
    type Error = AuthorizationError;

    fn try_from(claims: ClaimSet) -> Result<Self, Self::Error> {
        let user_id = ClaimsInspector::new(&claims).user_id()?.to_string();
        Ok(Self { user_id, claims })
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<ClaimSet>()
            .cloned()
            .ok_or(AuthorizationError::MissingClaims)
            .map_err(IntoResponse::into_response)?;

        Self::try_from(claims).map_err(|err| {
            tracing::debug!("Rejecting claims without a usable subject: {}", err);
            err.into_response()
        })
    }
}
