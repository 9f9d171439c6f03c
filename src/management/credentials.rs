use crate::{
    management::store::{KeyValueStore, StoreError},
    types::Credential,
    utils,
};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const EXPIRY_KEY: &str = "expiry_time";

/// Margin subtracted from the stored expiry when checking liveness, in ms.
pub const EXPIRY_BUFFER_MS: i64 = 60_000;

/// Validity window assumed when the backend does not report one, in seconds.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Access token, refresh token and expiry kept under three fixed keys.
///
/// The expiry is stored exactly as reported by the backend; the buffer is
/// only applied in [`CredentialStore::is_expired`]. Access token and expiry
/// are always written together.
pub struct CredentialStore<S> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        CredentialStore { store }
    }

    pub async fn access_token(&self) -> Result<Option<String>, StoreError> {
        Ok(non_empty(self.store.get(ACCESS_TOKEN_KEY).await?))
    }

    pub async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        Ok(non_empty(self.store.get(REFRESH_TOKEN_KEY).await?))
    }

    /// Stored expiry in epoch milliseconds, `None` if missing or unparsable.
    pub async fn expiry(&self) -> Result<Option<i64>, StoreError> {
        Ok(self
            .store
            .get(EXPIRY_KEY)
            .await?
            .and_then(|v| v.trim().parse::<i64>().ok()))
    }

    /// Full credential set, if all three values are present.
    pub async fn load(&self) -> Result<Option<Credential>, StoreError> {
        let (Some(access_token), Some(refresh_token), Some(expiry)) = (
            self.access_token().await?,
            self.refresh_token().await?,
            self.expiry().await?,
        ) else {
            return Ok(None);
        };

        Ok(Some(Credential {
            access_token,
            refresh_token,
            expiry,
        }))
    }

    pub async fn is_expired(&self) -> Result<bool, StoreError> {
        self.is_expired_at(utils::now_millis()).await
    }

    /// True if no expiry is stored or `now_ms` is past `expiry - 60s`.
    pub async fn is_expired_at(&self, now_ms: i64) -> Result<bool, StoreError> {
        Ok(match self.expiry().await? {
            Some(expiry) => now_ms > expiry - EXPIRY_BUFFER_MS,
            None => true,
        })
    }

    /// Stores a new access token valid for `expires_in_secs` from now.
    ///
    /// The refresh token is only written when one is supplied, a refresh
    /// response usually does not carry one.
    pub async fn save(
        &mut self,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_in_secs: u64,
    ) -> Result<(), StoreError> {
        let expiry = utils::expiry_from_now(utils::now_millis(), expires_in_secs);
        self.store.set(ACCESS_TOKEN_KEY, access_token).await?;
        self.store.set(EXPIRY_KEY, &expiry.to_string()).await?;
        if let Some(refresh) = refresh_token.filter(|r| !r.is_empty()) {
            self.store.set(REFRESH_TOKEN_KEY, refresh).await?;
        }
        Ok(())
    }

    /// Stores a complete credential set delivered by the login redirect.
    pub async fn store_login(&mut self, credential: &Credential) -> Result<(), StoreError> {
        self.store
            .set(ACCESS_TOKEN_KEY, &credential.access_token)
            .await?;
        self.store
            .set(EXPIRY_KEY, &credential.expiry.to_string())
            .await?;
        self.store
            .set(REFRESH_TOKEN_KEY, &credential.refresh_token)
            .await
    }

    /// Drops the access token so the next lookup forces a refresh.
    pub async fn discard_access_token(&mut self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY).await
    }

    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY).await?;
        self.store.remove(REFRESH_TOKEN_KEY).await?;
        self.store.remove(EXPIRY_KEY).await
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
