use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Authorization-specific errors for role and scope gates
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    /// No claim set was attached to the request
    #[error("Missing token claims")]
    MissingClaims,

    /// The claim set has no usable subject
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    /// Required role was not found in token claims
    #[error("Insufficient role. Required one of: {}", .0.join(", "))]
    InsufficientRole(Vec<String>),

    /// Required scope(s) were not found in token claims
    #[error("Insufficient scope. Required all of: {}", .0.join(", "))]
    InsufficientScope(Vec<String>),
}

impl AuthorizationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthorizationError::MissingClaims | AuthorizationError::InvalidSubject(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthorizationError::InsufficientRole(_) | AuthorizationError::InsufficientScope(_) => {
                StatusCode::FORBIDDEN
            }
        }
    }
}

impl From<crate::ClaimsError> for AuthorizationError {
    fn from(err: crate::ClaimsError) -> Self {
        AuthorizationError::InvalidSubject(err.to_string())
    }
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
