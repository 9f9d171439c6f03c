use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{server::LoginState, utils};

/// Receives the browser after login with the tokens in the query string.
///
/// The tokens are handed over through the shared state and the browser is
/// redirected to `/done`, so they no longer show up in the address bar.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<LoginState>,
) -> Response {
    if let Some(error) = params.get("error") {
        crate::warning!("Login failed: {}", error);
        return Html("<h4>Login failed.</h4>").into_response();
    }

    let credential = utils::credential_from_redirect(
        params.get("access_token").map(String::as_str),
        params.get("refresh_token").map(String::as_str),
        params.get("expiry_time").map(String::as_str),
        utils::now_millis(),
    );

    match credential {
        Some(credential) => {
            let mut state = shared_state.lock().await;
            *state = Some(credential);
            Redirect::to("/done").into_response()
        }
        None => Html("<h4>Missing tokens.</h4>").into_response(),
    }
}

pub async fn done() -> Html<&'static str> {
    Html("<h2>Login successful.</h2><p>You can close this browser window.</p>")
}
