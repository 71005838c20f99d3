//! SQLite storage for watchlists.

mod model;
mod repository;

pub use model::{NewWatchlistItemDB, WatchlistItemDB};
pub use repository::WatchlistRepository;
