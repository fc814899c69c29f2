pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;
pub use store::ItemStore;
