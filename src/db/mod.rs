//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `MedicineStorage`, the data-access layer over a pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Medicine, NewMedicine, TakenRecord};
pub use schema::SQLITE_INIT;
pub use sqlite::{MedicineStorage, SqlitePool};
