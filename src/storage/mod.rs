//! Counter Storage Module
//!
//! Holds the word → count mapping shared by every ingestion run.
//!
//! ## Core Concepts
//! - **Single shared instance**: one `WordCountStore` is created at startup and
//!   injected (`Arc`) into every component that needs it; nothing else holds
//!   counter state.
//! - **Atomic upsert**: `increment` is the only way a counter grows. It is a
//!   single locked entry update, so concurrent runs hitting the same word
//!   cannot lose an increment.
//! - **Best-effort reads**: a query made while a run is mid-flight observes the
//!   counts applied up to that point in time.

pub mod memory;
