//! # API Module
//!
//! HTTP endpoints served by the temporary local server that backs the OAuth
//! flow. Two routes exist:
//!
//! - [`callback`] - receives the authorization code from Spotify's redirect
//!   and completes the PKCE token exchange
//! - [`health`] - reports status and version, useful to verify the server
//!   came up while debugging a stuck auth flow
//!
//! Built on [Axum](https://docs.rs/axum); the server only runs for the
//! duration of `splocli auth`.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
