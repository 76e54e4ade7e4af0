//! System Operations Module
//!
//! Liveness and service-level introspection endpoints. None of these touch
//! the counting pipeline.

pub mod handlers;
