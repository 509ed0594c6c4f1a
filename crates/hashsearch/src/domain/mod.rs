//! Domain layer - Pure computational logic
//!
//! This module contains the candidate space, hash functions and search
//! configuration, without any scheduling or shared state.

pub mod alphabet;
pub mod cancel;
pub mod config;
pub mod hash;
pub mod indexer;
