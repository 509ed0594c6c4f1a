//! hashsearch - Cancellable parallel exhaustive search over hash inputs
//!
//! This crate provides functionality to:
//! - Map 64-bit indices to candidate strings and back, deterministically
//! - Scan an index range on a worker pool, stopping every worker after the first hit
//! - Search for hash collisions, second preimages and digest prefixes

pub mod app;
pub mod constants;
pub mod domain;

// Re-export commonly used types
pub use app::engine::{SearchEngine, SearchError, SearchOutcome, SearchResult, search_sequential};
pub use app::policy::{Collision, CollisionPolicy, PrefixPolicy, SearchPolicy, SecondPreimagePolicy};
pub use app::searcher::{find_collision, find_hash_prefix, find_second_preimage};
pub use constants::*;
pub use domain::alphabet::Alphabet;
pub use domain::cancel::CancellationToken;
pub use domain::config::{ConfigError, Encoding, SearchConfig};
pub use domain::hash::{HashFn, HashKind, Sha256Hex, SimpleHash};
pub use domain::indexer::Indexer;
