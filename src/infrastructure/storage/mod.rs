//! Storage infrastructure - Menu repository implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageFactory, StorageType};
pub use in_memory::InMemoryMenuRepository;
pub use postgres::{PostgresConfig, PostgresMenuRepository};
