//! Statistics Module
//!
//! Read and delete access to the word counters for external queries.
//!
//! Statistics are served on a best-effort basis: a query made while an
//! ingestion run is actively updating the store returns the counts that were
//! in place at the moment of the call, which may be partial for that run.

pub mod handlers;
pub mod service;
