use reqwest::Client;

use crate::{
    config::{self, ConfigError},
    types::{RecommendationRequest, RefreshTokenRequest},
};

/// Raw reply of the backend, classified by the caller.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: u16,
    pub body: String,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP access to the token-issuing / recommendation-proxying backend.
#[derive(Debug, Clone)]
pub struct Backend {
    http: Client,
    base_url: String,
}

impl Backend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Backend {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a backend from `TRACKREC_BACKEND_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(config::backend_url()?))
    }

    /// Page that starts the OAuth login and ends in a redirect carrying the tokens.
    pub fn login_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// `POST /refresh-token` with body `{refresh_token}`.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<BackendReply, reqwest::Error> {
        let res = self
            .http
            .post(format!("{}/refresh-token", self.base_url))
            .json(&RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(BackendReply { status, body })
    }

    /// `GET /recommendations?song=&artist=` bearing `token`.
    ///
    /// `limit` and `market` are only sent when set on the request.
    pub async fn recommendations(
        &self,
        token: &str,
        request: &RecommendationRequest,
    ) -> Result<BackendReply, reqwest::Error> {
        let mut query: Vec<(&str, String)> = vec![
            ("song", request.song.clone()),
            ("artist", request.artist.clone()),
        ];
        if let Some(limit) = request.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(market) = &request.market {
            query.push(("market", market.clone()));
        }

        let res = self
            .http
            .get(format!("{}/recommendations", self.base_url))
            .query(&query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(BackendReply { status, body })
    }
}
