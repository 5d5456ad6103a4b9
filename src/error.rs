//! Error types for claim inspection

/// Errors raised while extracting identity or loading configuration.
///
/// Role and scope derivation never produces one of these; malformed role or
/// scope claims are treated as absent.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("Missing claim: {0}")]
    MissingClaim(String),

    #[error("Invalid claim {claim}: expected {expected}")]
    InvalidClaim {
        claim: String,
        expected: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClaimsError>;

impl ClaimsError {
    /// Name of the claim this error refers to, if any
    pub fn claim(&self) -> Option<&str> {
        match self {
            ClaimsError::MissingClaim(claim) => Some(claim),
            ClaimsError::InvalidClaim { claim, .. } => Some(claim),
            _ => None,
        }
    }
}
