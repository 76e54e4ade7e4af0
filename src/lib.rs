//! Word Count Service Library
//!
//! This library crate defines the core modules of the word-count ingestion and
//! statistics service. It serves as the foundation for the binary executable
//! (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of loosely coupled subsystems around one shared
//! counter store:
//!
//! - **`ingestion`**: The intake pipeline. Validates and opens sources (inbound
//!   stream, local file, remote URL), tokenizes them incrementally, and drives
//!   every word into the counter store.
//! - **`executor`**: The execution-mode layer. Runs an ingestion either on the
//!   caller's control flow or on a bounded worker pool, handing back a
//!   completion handle the caller may await or ignore.
//! - **`storage`**: The shared counter state. A concurrent word → count map
//!   whose upsert is a single atomic entry update.
//! - **`statistics`**: Read/delete access to counters for external queries.
//! - **`system`**: Liveness and introspection endpoints.
//! - **`error`**: The service-wide error taxonomy and its HTTP mapping.

pub mod error;
pub mod executor;
pub mod ingestion;
pub mod statistics;
pub mod storage;
pub mod system;
