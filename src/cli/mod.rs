//! # CLI Module
//!
//! Command-line layer of trackrec. Every command opens the credential store,
//! delegates to [`crate::spotify`] and prints the outcome with the crate's
//! output macros. Library errors arrive here as values and are shown as a
//! single message; nothing below this layer exits the process.
//!
//! ## Commands
//!
//! - [`login`] - browser login on the backend, stores the delivered tokens
//! - [`recommend`] - similar tracks for a song and artist, as a table
//! - [`status`] - whether credentials are stored and when they expire
//! - [`logout`] - removes the stored credentials
//!
//! ## Usage
//!
//! ```bash
//! trackrec login
//! trackrec recommend --song "Karma Police" --artist "Radiohead"
//! trackrec recommend --song "Hey Ya!" --artist "OutKast" --limit 10 --market DE
//! trackrec status
//! trackrec logout
//! ```

mod auth;
mod recommend;

pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use recommend::recommend;

use crate::{
    config, error,
    management::{CredentialStore, FileStore},
    spotify::Backend,
};

async fn open_credentials() -> CredentialStore<FileStore> {
    let path = config::store_path();
    match FileStore::open(path.clone()).await {
        Ok(store) => CredentialStore::new(store),
        Err(e) => error!(
            "Failed to open credential store at {}. Err: {}",
            path.display(),
            e
        ),
    }
}

fn open_backend() -> Backend {
    match Backend::from_env() {
        Ok(backend) => backend,
        Err(e) => error!("Cannot configure backend. Err: {}", e),
    }
}
