//! Core utilities for the NBA Intel CLI
//!
//! - `cache`: two-tier (memory LRU + JSON file) TTL cache

pub mod cache;

pub use cache::{cache_root, try_read_to_string, write_string, CacheKey, CacheStatus, UnifiedCache};
