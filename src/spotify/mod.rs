//! # Spotify Integration Module
//!
//! This module is the only place that talks to the Spotify Web API. It
//! handles the OAuth 2.0 PKCE flow, catalog search, artist follows and
//! playlist mutations, abstracting HTTP details away from the CLI layer.
//!
//! ## Submodules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge setup, browser
//!   launch, local callback handling, token exchange and refresh
//! - [`search`] - Catalog search used to resolve local artist names and
//!   song tags to Spotify ids and track URIs, including the best-match
//!   policy for ambiguous track results
//! - [`follow`] - Following artists in batches of up to 50 ids
//! - [`playlist`] - Playlist creation and batched track addition (100 URIs
//!   per request)
//!
//! ## Error handling
//!
//! Every request loop retries 502 Bad Gateway responses after a 10 second
//! pause and honors `Retry-After` on 429 responses up to two minutes; all
//! other HTTP failures surface as `reqwest::Error` for the caller to count
//! or abort on. Authentication failures never retry silently - the user is
//! pointed at `splocli auth`.
//!
//! ## Endpoints used
//!
//! - `GET /search` - artist and track resolution
//! - `PUT /me/following` - batch follow
//! - `POST /users/{user_id}/playlists` - playlist creation
//! - `POST /playlists/{playlist_id}/tracks` - batch track addition
//! - `POST /api/token` - token exchange and refresh

pub mod auth;
pub mod follow;
pub mod playlist;
pub mod search;
