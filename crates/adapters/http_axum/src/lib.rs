//! # sentra-adapter-http-axum
//!
//! HTTP adapter using [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Expose the ingestion entry point (`POST /api/ingest`)
//! - Serve read-only device, log, stats, and variant-config endpoints
//! - Bridge the in-process event bus onto a WebSocket stream
//! - Map domain errors to HTTP status codes
//!
//! ## Dependency rule
//! Depends on `sentra-app` (services and port traits) and `sentra-domain`.
//! The `app` and `domain` crates must never reference this adapter.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
