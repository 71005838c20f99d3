//! API response cache - model, store contract, service and an in-memory store.

mod cache_model;
mod cache_service;
mod cache_traits;
mod memory_store;

pub use cache_model::CacheEntry;
pub use cache_service::CacheService;
pub use cache_traits::CacheStoreTrait;
pub use memory_store::MemoryCacheStore;
