use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tower::Layer;
use tower::Service;

use super::error::AuthorizationError;
use crate::claims::{ClaimSet, ClaimsInspector};
use crate::config::InspectorConfig;

#[derive(Debug, Clone)]
enum Requirement {
    AnyRealmRole(Vec<String>),
    AnyAccountRole(Vec<String>),
    AllScopes(Vec<String>),
}

impl Requirement {
    fn check(&self, inspector: &ClaimsInspector<'_>) -> Result<(), AuthorizationError> {
        match self {
            Requirement::AnyRealmRole(roles) => {
                if roles.iter().any(|role| inspector.is_in_realm_role(role)) {
                    Ok(())
                } else {
                    Err(AuthorizationError::InsufficientRole(roles.clone()))
                }
            }
            Requirement::AnyAccountRole(roles) => {
                if roles.iter().any(|role| inspector.is_in_account_role(role)) {
                    Ok(())
                } else {
                    Err(AuthorizationError::InsufficientRole(roles.clone()))
                }
            }
            Requirement::AllScopes(scopes) => {
                if scopes.iter().all(|scope| inspector.token_has_scope(scope)) {
                    Ok(())
                } else {
                    Err(AuthorizationError::InsufficientScope(scopes.clone()))
                }
            }
        }
    }

    fn authorize(&self, request: &Request, config: &InspectorConfig) -> Result<(), AuthorizationError> {
        let claims = request
            .extensions()
            .get::<ClaimSet>()
            .ok_or(AuthorizationError::MissingClaims)?;
        let inspector = ClaimsInspector::with_config(claims, config);
        self.check(&inspector)
    }
}

/// Middleware layer that requires one of the specified realm roles
#[derive(Debug, Clone)]
pub struct RequireRealmRole {
    requirement: Arc<Requirement>,
}

impl RequireRealmRole {
    /// Create a new RequireRealmRole middleware requiring at least one of the specified roles
    pub fn new(required_roles: Vec<String>) -> Self {
        Self {
            requirement: Arc::new(Requirement::AnyRealmRole(required_roles)),
        }
    }
}

impl<S> Layer<S> for RequireRealmRole {
    type Service = ClaimsGate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClaimsGate::new(inner, self.requirement.clone(), Arc::default())
    }
}

/// Middleware layer that requires one of the specified account roles
#[derive(Debug, Clone)]
pub struct RequireAccountRole {
    requirement: Arc<Requirement>,
    config: Arc<InspectorConfig>,
}

impl RequireAccountRole {
    /// Require at least one of the roles of the default `account` client
    pub fn new(required_roles: Vec<String>) -> Self {
        Self::with_config(required_roles, InspectorConfig::default())
    }

    /// Require at least one of the roles of the client named in `config`
    pub fn with_config(required_roles: Vec<String>, config: InspectorConfig) -> Self {
        Self {
            requirement: Arc::new(Requirement::AnyAccountRole(required_roles)),
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for RequireAccountRole {
    type Service = ClaimsGate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClaimsGate::new(inner, self.requirement.clone(), self.config.clone())
    }
}

/// Middleware layer that requires all of the specified scopes
#[derive(Debug, Clone)]
pub struct RequireScope {
    requirement: Arc<Requirement>,
}

impl RequireScope {
    /// Create a new RequireScope middleware requiring all of the specified scopes
    pub fn new(required_scopes: Vec<String>) -> Self {
        Self {
            requirement: Arc::new(Requirement::AllScopes(required_scopes)),
        }
    }
}

impl<S> Layer<S> for RequireScope {
    type Service = ClaimsGate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClaimsGate::new(inner, self.requirement.clone(), Arc::default())
    }
}

/// Service produced by the role and scope layers
#[derive(Debug, Clone)]
pub struct ClaimsGate<S> {
    inner: S,
    requirement: Arc<Requirement>,
    config: Arc<InspectorConfig>,
}

impl<S> ClaimsGate<S> {
    fn new(inner: S, requirement: Arc<Requirement>, config: Arc<InspectorConfig>) -> Self {
        Self {
            inner,
            requirement,
            config,
        }
    }
}

impl<S> Service<Request> for ClaimsGate<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Take the service that was driven to readiness, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let requirement = self.requirement.clone();
        let config = self.config.clone();

        Box::pin(async move {
            if let Err(err) = requirement.authorize(&request, &config) {
                tracing::debug!("Rejecting {} {}: {}", request.method(), request.uri(), err);
                return Ok(err.into_response());
            }

            inner.call(request).await
        })
    }
}
