//! Upstream quote access with write-through caching.

mod fetcher;

pub use fetcher::{QuoteFetcher, QUOTE_PATH};

#[cfg(test)]
mod fetcher_tests;
