mod auth;
mod library;

pub use auth::TokenManager;
pub use library::CacheError;
pub use library::CacheValidity;
pub use library::LibraryManager;
