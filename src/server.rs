use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, types::Credential};

/// Credential harvested from the login redirect, filled in by the callback.
pub type LoginState = Arc<Mutex<Option<Credential>>>;

pub fn router(state: LoginState) -> Router {
    Router::new()
        .route("/", get(api::callback).layer(Extension(state)))
        .route("/done", get(api::done))
        .route("/health", get(api::health))
}

/// Serves the login callback routes on `listener` until the task is aborted.
pub async fn start_callback_server(listener: TcpListener, state: LoginState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
