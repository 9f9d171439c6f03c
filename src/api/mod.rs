//! # API Module
//!
//! HTTP endpoints of the short-lived listener that receives the browser after
//! a login on the recommendation backend.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /` takes `access_token`, `refresh_token` and
//!   `expiry_time` from the query string, hands them to the waiting login
//!   command and redirects to `/done` to clear the URL.
//! - [`done`] - `GET /done` confirmation page.
//! - [`health`] - `GET /health` status and version.

mod callback;
mod health;

pub use callback::{callback, done};
pub use health::health;
