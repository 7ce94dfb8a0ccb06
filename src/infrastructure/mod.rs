pub mod inventory_source;
pub mod memory_store;
pub mod models;
pub mod record_repo;
