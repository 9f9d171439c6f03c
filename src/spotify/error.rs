use thiserror::Error;

use crate::management::StoreError;

pub const SESSION_EXPIRED: &str = "Session expired - please log in again";
pub const FALLBACK_MESSAGE: &str = "Failed to get recommendations";

/// Why a credential could not be (re)established.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("No refresh token available - please log in again")]
    MissingRefreshToken,
    #[error("Invalid token response from server")]
    InvalidResponse,
    #[error("refresh token rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("token endpoint unreachable: {0}")]
    Transport(String),
    #[error("credential storage failed: {0}")]
    Storage(String),
    #[error("backend kept rejecting the access token")]
    Unauthorized,
}

/// Session could not be kept alive. Stored credentials are gone by the time
/// this is returned from a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", SESSION_EXPIRED)]
pub struct AuthError {
    #[source]
    pub cause: AuthFailure,
}

impl AuthError {
    pub fn new(cause: AuthFailure) -> Self {
        AuthError { cause }
    }
}

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Both song and artist are required")]
    Validation,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{}", or_fallback(.0))]
    Transport(String),
    #[error("{}", service_message(.message, .solution.as_deref()))]
    Service {
        status: u16,
        message: String,
        solution: Option<String>,
    },
    #[error("No recommendations found. Try different inputs.")]
    EmptyResult,
    #[error("credential storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl RecommendationError {
    /// HTTP status of a backend failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RecommendationError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Remediation hint sent by the backend, if any.
    pub fn solution(&self) -> Option<&str> {
        match self {
            RecommendationError::Service { solution, .. } => solution.as_deref(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, RecommendationError::Auth(_))
    }
}

fn service_message(message: &str, solution: Option<&str>) -> String {
    match solution.filter(|s| !s.is_empty()) {
        Some(solution) => format!("{}\n{}", or_fallback(message), solution),
        None => or_fallback(message).to_string(),
    }
}

fn or_fallback(message: &str) -> &str {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE
    } else {
        message
    }
}
