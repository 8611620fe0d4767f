mod memory;
mod redis;
mod types;

pub use types::{CacheBackend, InMemoryCacheBackend, RedisCacheBackend};
