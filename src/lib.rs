//! Similar Track Recommendation CLI Library
//!
//! This library looks up tracks similar to a given song and artist through a
//! recommendation backend that proxies the Spotify Web API. The backend is
//! protected by OAuth access tokens, so most of the library deals with keeping
//! a stored credential set alive: checking expiry, refreshing, retrying once on
//! an unauthorized response, and turning failures into user-facing messages.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local login callback listener
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Key-value storage and the credential store built on it
//! - `server` - Local HTTP listener receiving the login redirect
//! - `spotify` - Backend client, refresh flow and recommendation client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line glue where the exact error type no longer
/// matters and only its message is shown to the user.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening login page...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the command-line layer. Library code returns errors
/// instead of calling this.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a diagnostic message to stderr when `TRACKREC_DEBUG` is set.
///
/// Retry decisions, refresh failures and backend notices go through this
/// macro so they stay out of normal command output.
///
/// # Example
///
/// ```
/// debug!("Attempt {} failed: {}", attempt, err);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::config::debug_enabled() {
      use colored::Colorize;
      eprintln!("[{}] {}", "~".dimmed(), std::format_args!($($arg)*));
    }
  })
}
