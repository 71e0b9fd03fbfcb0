pub mod memory_database;
pub mod repositories;
