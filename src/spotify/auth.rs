use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    debug,
    management::{CredentialStore, DEFAULT_EXPIRES_IN_SECS, KeyValueStore},
    server::{LoginState, start_callback_server},
    spotify::{
        backend::Backend,
        error::{AuthError, AuthFailure},
    },
    types::{Credential, ErrorEnvelope, RefreshTokenResponse},
    warning,
};

/// How long `login` waits for the browser to come back with tokens.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Exchanges the stored refresh token for a new access token.
///
/// On success the new access token and its expiry are persisted (one hour
/// when the backend omits `expires_in`), together with a rotated refresh
/// token if the backend sent one, and the access token is returned.
///
/// Every failure clears all stored credentials before returning, so the
/// caller never continues with a half-valid set. The returned [`AuthError`]
/// always reads "Session expired - please log in again"; the concrete reason
/// is available as its `cause`.
pub async fn refresh<S: KeyValueStore>(
    backend: &Backend,
    credentials: &mut CredentialStore<S>,
) -> Result<String, AuthError> {
    match request_new_token(backend, credentials).await {
        Ok(token) => Ok(token),
        Err(cause) => {
            debug!("Token refresh failed: {}", cause);
            if let Err(e) = credentials.clear().await {
                warning!("Failed to clear stored credentials: {}", e);
            }
            Err(AuthError::new(cause))
        }
    }
}

async fn request_new_token<S: KeyValueStore>(
    backend: &Backend,
    credentials: &mut CredentialStore<S>,
) -> Result<String, AuthFailure> {
    let refresh_token = credentials
        .refresh_token()
        .await
        .map_err(|e| AuthFailure::Storage(e.to_string()))?
        .ok_or(AuthFailure::MissingRefreshToken)?;

    let reply = backend
        .refresh_token(&refresh_token)
        .await
        .map_err(|e| AuthFailure::Transport(e.to_string()))?;

    if !reply.is_success() {
        let envelope: ErrorEnvelope = serde_json::from_str(&reply.body).unwrap_or_default();
        return Err(AuthFailure::Rejected {
            status: reply.status,
            message: envelope
                .error
                .unwrap_or_else(|| format!("Request failed with status code {}", reply.status)),
        });
    }

    let res: RefreshTokenResponse =
        serde_json::from_str(&reply.body).map_err(|_| AuthFailure::InvalidResponse)?;
    let access_token = res
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthFailure::InvalidResponse)?;

    credentials
        .save(
            &access_token,
            res.refresh_token.as_deref(),
            res.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        )
        .await
        .map_err(|e| AuthFailure::Storage(e.to_string()))?;

    debug!("Access token refreshed");
    Ok(access_token)
}

/// Runs the browser login and stores the credential it delivers.
///
/// 1. Starts the local callback listener on `addr`
/// 2. Opens the backend login page in the default browser
/// 3. Waits for the redirect carrying the tokens
/// 4. Persists them through the credential store
///
/// Returns the stored credential, or `None` if nothing arrived in time.
pub async fn login<S: KeyValueStore>(
    backend: &Backend,
    credentials: &mut CredentialStore<S>,
    addr: &str,
    timeout: Duration,
) -> crate::Res<Option<Credential>> {
    let shared_state: LoginState = Arc::new(Mutex::new(None));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(listener, server_state).await {
            warning!("Callback listener stopped: {}", e);
        }
    });

    let login_url = backend.login_url();
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let credential = wait_for_credential(Arc::clone(&shared_state), timeout).await;

    // give the browser a moment to follow the redirect that strips the tokens
    tokio::time::sleep(Duration::from_millis(500)).await;
    server.abort();

    match credential {
        Some(c) => {
            credentials.store_login(&c).await?;
            Ok(Some(c))
        }
        None => Ok(None),
    }
}

/// Polls the shared state until a credential shows up or `timeout` has passed.
pub async fn wait_for_credential(shared_state: LoginState, timeout: Duration) -> Option<Credential> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < timeout {
        let lock = shared_state.lock().await;
        if let Some(credential) = lock.as_ref() {
            return Some(credential.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    None
}
