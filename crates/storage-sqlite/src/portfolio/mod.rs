//! SQLite storage for portfolio holdings.

mod model;
mod repository;

pub use model::{NewPortfolioItemDB, PortfolioChangesDB, PortfolioItemDB};
pub use repository::PortfolioRepository;
