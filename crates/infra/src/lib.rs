//! Infrastructure layer: SQLite connection, schema, and the users/cars store.

pub mod db;
pub mod error;
pub mod store;
pub mod timeouts;

pub use db::DatabaseConfig;
pub use error::{StoreError, StoreResult};
pub use store::{FleetStore, SqliteFleetStore};
pub use timeouts::StoreTimeouts;
