use crate::{
    debug,
    management::{CredentialStore, KeyValueStore},
    spotify::{
        auth,
        backend::{Backend, BackendReply},
        error::{AuthError, AuthFailure, RecommendationError},
    },
    types::{ErrorEnvelope, RecommendationRequest, RecommendationsResponse, Track},
};

/// Upper bound of recommendation requests issued per call.
pub const MAX_ATTEMPTS: u32 = 2;

/// States of a single `get_recommendations` call.
#[derive(Debug)]
pub enum AttemptState {
    NeedToken,
    HaveToken(String),
    Requesting(String),
    Retryable401,
    Success(Vec<Track>),
    TerminalError(RecommendationError),
}

/// What a recommendation reply means for the state machine.
#[derive(Debug)]
pub enum Outcome {
    Tracks {
        tracks: Vec<Track>,
        notice: Option<String>,
    },
    Unauthorized,
    Failed(RecommendationError),
}

/// Classifies a backend reply.
///
/// - 2xx with at least one track: `Tracks`
/// - 2xx with an empty or missing list: `Failed(EmptyResult)`
/// - 401: `Unauthorized`
/// - anything else: `Failed(Service)` with the backend's `error`/`solution`,
///   or a status line when the body carries no error envelope
pub fn classify_response(reply: &BackendReply) -> Outcome {
    if reply.is_success() {
        return match serde_json::from_str::<RecommendationsResponse>(&reply.body) {
            Ok(RecommendationsResponse { tracks, notice }) => match tracks {
                Some(tracks) if !tracks.is_empty() => Outcome::Tracks { tracks, notice },
                _ => Outcome::Failed(RecommendationError::EmptyResult),
            },
            Err(e) => Outcome::Failed(RecommendationError::Transport(format!(
                "Invalid recommendation response: {}",
                e
            ))),
        };
    }

    if reply.status == 401 {
        return Outcome::Unauthorized;
    }

    let envelope: ErrorEnvelope = serde_json::from_str(&reply.body).unwrap_or_default();
    let message = match envelope.error.filter(|e| !e.trim().is_empty()) {
        Some(error) => error,
        None => format!("Request failed with status code {}", reply.status),
    };

    Outcome::Failed(RecommendationError::Service {
        status: reply.status,
        message,
        solution: envelope.solution.filter(|s| !s.trim().is_empty()),
    })
}

/// Next state after a request has produced `outcome`.
///
/// 403 (market restriction) and 424 (upstream dependency failure) end up in
/// `TerminalError` like every other non-401 failure; only a 401 may lead to
/// another attempt.
pub fn after_response(outcome: Outcome) -> AttemptState {
    match outcome {
        Outcome::Tracks { tracks, .. } => AttemptState::Success(tracks),
        Outcome::Unauthorized => AttemptState::Retryable401,
        Outcome::Failed(e) => AttemptState::TerminalError(e),
    }
}

/// Decides what follows a 401 after `attempts` requests have been made.
///
/// Returns `None` when another attempt is allowed, otherwise the terminal
/// state.
pub fn after_unauthorized(attempts: u32) -> Option<AttemptState> {
    if attempts < MAX_ATTEMPTS {
        None
    } else {
        Some(AttemptState::TerminalError(
            AuthError::new(AuthFailure::Unauthorized).into(),
        ))
    }
}

/// Trims both fields and rejects the request if either ends up empty.
pub fn validate(request: RecommendationRequest) -> Result<RecommendationRequest, RecommendationError> {
    let song = request.song.trim().to_string();
    let artist = request.artist.trim().to_string();
    if song.is_empty() || artist.is_empty() {
        return Err(RecommendationError::Validation);
    }

    Ok(RecommendationRequest {
        song,
        artist,
        limit: request.limit,
        market: request
            .market
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
    })
}

/// Fetches similar tracks, keeping the stored credential alive on the way.
pub struct RecommendationClient<S> {
    backend: Backend,
    credentials: CredentialStore<S>,
}

impl<S: KeyValueStore> RecommendationClient<S> {
    pub fn new(backend: Backend, credentials: CredentialStore<S>) -> Self {
        RecommendationClient {
            backend,
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    pub async fn get_recommendations(
        &mut self,
        song: &str,
        artist: &str,
    ) -> Result<Vec<Track>, RecommendationError> {
        self.recommend(RecommendationRequest::new(song, artist))
            .await
    }

    /// Runs the bounded retry state machine for `request`.
    ///
    /// Invalid input fails before any network call. A missing or expiring
    /// access token is refreshed first; a failed refresh ends the call. A 401
    /// discards the access token and starts over once. Everything else is
    /// returned after the first failure.
    pub async fn recommend(
        &mut self,
        request: RecommendationRequest,
    ) -> Result<Vec<Track>, RecommendationError> {
        let request = validate(request)?;

        let mut attempts: u32 = 0;
        let mut state = self.token_state().await?;

        loop {
            state = match state {
                AttemptState::NeedToken => {
                    debug!("Token expired or missing, refreshing...");
                    match auth::refresh(&self.backend, &mut self.credentials).await {
                        Ok(token) => AttemptState::HaveToken(token),
                        Err(e) => AttemptState::TerminalError(e.into()),
                    }
                }
                AttemptState::HaveToken(token) => {
                    attempts += 1;
                    AttemptState::Requesting(token)
                }
                AttemptState::Requesting(token) => {
                    let outcome = match self.backend.recommendations(&token, &request).await {
                        Ok(reply) => classify_response(&reply),
                        Err(e) => Outcome::Failed(RecommendationError::Transport(e.to_string())),
                    };
                    match &outcome {
                        Outcome::Tracks {
                            notice: Some(notice),
                            ..
                        } => crate::info!("{}", notice),
                        Outcome::Failed(e) => debug!("Attempt {} failed: {}", attempts, e),
                        _ => {}
                    }
                    after_response(outcome)
                }
                AttemptState::Retryable401 => match after_unauthorized(attempts) {
                    Some(terminal) => terminal,
                    None => {
                        debug!("Attempt {} unauthorized, retrying...", attempts);
                        self.credentials.discard_access_token().await?;
                        self.token_state().await?
                    }
                },
                AttemptState::Success(tracks) => return Ok(tracks),
                AttemptState::TerminalError(e) => return Err(e),
            };
        }
    }

    /// `NeedToken` if no usable access token is stored, else `HaveToken`.
    async fn token_state(&self) -> Result<AttemptState, RecommendationError> {
        let Some(token) = self.credentials.access_token().await? else {
            return Ok(AttemptState::NeedToken);
        };

        if self.credentials.is_expired().await? {
            Ok(AttemptState::NeedToken)
        } else {
            Ok(AttemptState::HaveToken(token))
        }
    }
}
