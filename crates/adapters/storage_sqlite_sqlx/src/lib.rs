//! # sentra-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `sentra-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `sentra-app` (for port traits) and `sentra-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod device_repo;
mod error;
mod log_store;
mod pool;

pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use log_store::SqliteLogStore;
pub use pool::{Config, Database};
