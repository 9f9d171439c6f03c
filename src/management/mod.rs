mod credentials;
mod store;

pub use credentials::CredentialStore;
pub use credentials::DEFAULT_EXPIRES_IN_SECS;
pub use credentials::EXPIRY_BUFFER_MS;
pub use credentials::{ACCESS_TOKEN_KEY, EXPIRY_KEY, REFRESH_TOKEN_KEY};
pub use store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
pub use store::StoreError;
