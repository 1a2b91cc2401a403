//! Configuration management for splocli.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage Spotify API settings, the local callback server address, and the
//! music library location.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//!
//! Commands that talk to Spotify or read the library call [`validate`] (or
//! [`validate_auth`] for the auth flow) once at startup, so the individual
//! getters may assume their variable is present.

use dotenv;
use std::{env, path::PathBuf};

/// Environment variables every remote workflow needs.
const REQUIRED_VARS: &[&str] = &[
    "SPOTIFY_API_URL",
    "SPOTIFY_API_TOKEN_URL",
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_USER_ID",
    "MUSIC_LIBRARY_PATH",
];

/// Environment variables the OAuth flow needs.
const AUTH_VARS: &[&str] = &[
    "SPOTIFY_API_AUTH_URL",
    "SPOTIFY_API_TOKEN_URL",
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_REDIRECT_URI",
    "SPOTIFY_API_AUTH_SCOPE",
    "SERVER_ADDRESS",
];

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// variables from `splocli/.env` under the platform-specific local data
/// directory:
/// - Linux: `~/.local/share/splocli/.env`
/// - macOS: `~/Library/Application Support/splocli/.env`
/// - Windows: `%LOCALAPPDATA%/splocli/.env`
///
/// A missing `.env` file is not an error; variables may come from the process
/// environment instead. Validation of required settings happens separately in
/// [`validate`] and [`validate_auth`].
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("splocli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Checks every setting the library and remote workflows depend on.
///
/// Reports all missing variables at once instead of failing on the first,
/// and verifies that `MUSIC_LIBRARY_PATH` points at an existing directory.
/// Callers print the returned message and exit before any remote call.
pub fn validate() -> Result<(), String> {
    let missing = missing_vars(REQUIRED_VARS);
    if !missing.is_empty() {
        return Err(format!(
            "Missing required settings: {}. See .env.example in your splocli data directory.",
            missing.join(", ")
        ));
    }

    let library = music_library_path();
    if !std::path::Path::new(&library).is_dir() {
        return Err(format!(
            "MUSIC_LIBRARY_PATH does not exist or is not a directory: {}",
            library
        ));
    }

    Ok(())
}

/// Checks every setting the OAuth flow depends on.
pub fn validate_auth() -> Result<(), String> {
    let missing = missing_vars(AUTH_VARS);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Missing required settings: {}. See .env.example in your splocli data directory.",
            missing.join(", ")
        ))
    }
}

fn missing_vars(names: &[&str]) -> Vec<String> {
    names
        .iter()
        .filter(|name| env::var(name).map(|v| v.trim().is_empty()).unwrap_or(true))
        .map(|name| name.to_string())
        .collect()
}

/// Returns the server address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set; run
/// [`validate_auth`] first.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify user ID that owns created playlists.
///
/// # Panics
///
/// Panics if the `SPOTIFY_USER_ID` environment variable is not set; run
/// [`validate`] first.
pub fn spotify_user() -> String {
    env::var("SPOTIFY_USER_ID").expect("SPOTIFY_USER_ID must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set;
/// run [`validate`] or [`validate_auth`] first.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set;
/// run [`validate_auth`] first.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions requested during OAuth.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set;
/// run [`validate_auth`] first.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set; run
/// [`validate_auth`] first.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set; run
/// [`validate`] first.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set; run
/// [`validate`] or [`validate_auth`] first.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the root directory of the local music library.
///
/// # Panics
///
/// Panics if the `MUSIC_LIBRARY_PATH` environment variable is not set; run
/// [`validate`] first.
pub fn music_library_path() -> String {
    env::var("MUSIC_LIBRARY_PATH").expect("MUSIC_LIBRARY_PATH must be set")
}
