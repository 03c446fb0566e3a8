//! # sentra-domain
//!
//! Pure domain model for the sentra monitoring platform.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Variants** (the five fixed monitoring contexts)
//! - Define **Metrics** (typed readings keyed by metric name)
//! - Define **Severity** rules (the per-variant evaluation chains)
//! - Define **Ingest events** (the unit of real-time fan-out)
//! - Define **Devices** and **Log records** (persisted projections)
//! - Define the static **variant configuration** table (thresholds + widgets)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod event;
pub mod log;
pub mod metrics;
pub mod severity;
pub mod variant;
pub mod variant_config;
