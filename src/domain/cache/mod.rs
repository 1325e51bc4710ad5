//! Cache domain - lookaside caching abstraction

mod repository;

pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
