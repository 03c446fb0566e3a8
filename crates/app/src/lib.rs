//! # sentra-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — upsert & query device records
//!   - `LogStore` — append & query immutable log records
//!   - `EventPublisher` — fan-out of ingest events
//!   - `VariantConfigSource` — per-variant configuration lookup
//! - Define **driving/inbound ports** as use-case structs:
//!   - `IngestService` — the sole write path for readings
//!   - `DeviceService` — device queries
//!   - `LogService` — log queries and the stats projection
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Host the **dashboard state machine** and its live-view follower
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `sentra-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod config_source;
pub mod dashboard;
pub mod event_bus;
pub mod live;
pub mod ports;
pub mod services;
