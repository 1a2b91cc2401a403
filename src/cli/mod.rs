//! # CLI Module
//!
//! This module provides the command-line interface layer for splocli. It
//! implements all user-facing commands and coordinates between the library
//! scanner, the cache managers and the Spotify API layer.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication flow with PKCE security
//! - [`update_library`] / [`list_library`] - refresh or inspect the cached
//!   scan of the local music collection
//! - [`follow`] - follow every artist discovered in the library
//! - [`playlist`] - build a randomized, per-artist-capped playlist from the
//!   library
//!
//! ## Data flow
//!
//! ```text
//! CLI Layer (user interface)
//!     ↓
//! Library Layer (scan, group, sample)   Management Layer (caches, token)
//!     ↓                                      ↓
//! Spotify Layer (search, follow, playlist mutation)
//!     ↓
//! HTTP (reqwest)
//! ```
//!
//! All workflows share the same cache policy: a cached scan is used as-is
//! when every file still exists, trimmed when a few files went missing, and
//! discarded for a full rescan when more than 10% are gone or the file does
//! not parse. `--rescan` skips the policy entirely.
//!
//! Per-item problems (a song Spotify doesn't know, an unreadable file, a
//! failed batch) are counted and summarized at the end of each command;
//! only missing configuration or a missing token abort early.

mod auth;
mod follow;
mod library;
mod playlist;

pub use auth::auth;
pub use follow::follow;
pub use library::list_library;
pub use library::update_library;
pub use playlist::PlaylistParams;
pub use playlist::playlist;
