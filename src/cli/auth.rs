use crate::{
    cli::{open_backend, open_credentials},
    config, error, info,
    spotify::{self, auth::LOGIN_TIMEOUT},
    success, utils, warning,
};

pub async fn login() {
    let backend = open_backend();
    let mut credentials = open_credentials().await;

    info!("Opening login page at {}", backend.login_url());
    match spotify::auth::login(&backend, &mut credentials, &config::callback_addr(), LOGIN_TIMEOUT)
        .await
    {
        Ok(Some(credential)) => success!(
            "Login successful! Access token valid until {}",
            utils::format_expiry(credential.expiry)
        ),
        Ok(None) => error!("Login failed or timed out."),
        Err(e) => error!("Login failed: {}", e),
    }
}

pub async fn logout() {
    let mut credentials = open_credentials().await;
    match credentials.clear().await {
        Ok(()) => success!("Stored credentials removed."),
        Err(e) => error!("Failed to remove stored credentials: {}", e),
    }
}

pub async fn status() {
    let credentials = open_credentials().await;

    let credential = match credentials.load().await {
        Ok(c) => c,
        Err(e) => error!("Failed to read stored credentials: {}", e),
    };

    let Some(credential) = credential else {
        warning!("Not logged in. Please run trackrec login");
        return;
    };

    let now = utils::now_millis();
    let expired = credentials.is_expired_at(now).await.unwrap_or(true);
    let when = format!(
        "{} ({})",
        utils::format_expiry(credential.expiry),
        utils::describe_remaining(credential.expiry, now)
    );

    if expired {
        info!("Access token expired or about to expire: {}", when);
        info!("It will be refreshed on the next request.");
    } else {
        success!("Access token valid until {}", when);
    }
}
