pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::{Fixture, MemoryStore};
pub use postgres::PgContentStore;
pub use store::{ContentStore, StoreError};
