//! SQLite storage for the API response cache.

mod model;
mod repository;

pub use model::CacheEntryDB;
pub use repository::CacheRepository;
