//! Users and sessions - domain models, services, and traits.

mod users_model;
mod users_service;
mod users_traits;


pub use users_model::{Credentials, NewUser, Session, User, SESSION_TTL_DAYS};
pub use users_service::UserService;
pub use users_traits::{SessionRepositoryTrait, UserRepositoryTrait, UserServiceTrait};
