//! SQLite storage for users and sessions.

mod model;
mod repository;

pub use model::{NewUserDB, SessionDB, UserDB};
pub use repository::{SessionRepository, UserRepository};
