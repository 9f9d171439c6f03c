//! # Spotify Recommendation Backend Integration
//!
//! Client side of the recommendation backend, which holds the Spotify app
//! credentials and proxies recommendation lookups for us.
//!
//! - [`backend`] - raw HTTP calls to `/refresh-token` and `/recommendations`
//! - [`auth`] - refresh flow and browser login
//! - [`recommendations`] - validation, retry state machine, reply classification
//! - [`error`] - error types handed to the caller
//!
//! ## Token lifecycle
//!
//! The access token is checked against its stored expiry minus a one minute
//! buffer before each call. A stale or missing token is refreshed first. If
//! the backend still answers 401 the access token is dropped and the whole
//! attempt runs once more; a failed refresh wipes the stored credentials.

pub mod auth;
pub mod backend;
pub mod error;
pub mod recommendations;

pub use backend::Backend;
pub use error::{AuthError, AuthFailure, RecommendationError};
pub use recommendations::RecommendationClient;
