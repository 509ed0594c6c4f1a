//! Application layer - Use case implementations
//!
//! This module drives the domain layer on a worker pool to implement the
//! collision, second preimage and prefix searches.

pub mod engine;
pub mod policy;
pub mod searcher;
