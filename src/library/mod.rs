//! # Local Library Module
//!
//! Everything that happens before Spotify gets involved: walking the music
//! directory and reading tags ([`scanner`]), grouping songs by artist
//! ([`index`]), and drawing a randomized, per-artist-capped selection from
//! the full collection ([`sampler`]).
//!
//! The persisted cache of scanner output lives in
//! [`crate::management::LibraryManager`]; this module only deals with
//! in-memory song data.

pub mod index;
pub mod sampler;
pub mod scanner;
