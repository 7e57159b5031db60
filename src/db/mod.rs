pub mod sqlite;
pub mod store;

pub use sqlite::{create_in_memory_pool, create_pool, run_migrations};
pub use store::{ContentStore, SqliteStore};

#[cfg(test)]
pub use store::MockContentStore;
