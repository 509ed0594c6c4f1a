//! Search engine constants
//!
//! Defaults used when a [`SearchConfig`](crate::domain::config::SearchConfig)
//! does not override them.

// =============================================================================
// Candidate space
// =============================================================================

/// Default candidate alphabet (62 symbols: digits, uppercase, lowercase)
pub const DEFAULT_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default fixed candidate length
pub const DEFAULT_MAX_LEN: usize = 8;

// =============================================================================
// Scheduling
// =============================================================================

/// Default number of indices per chunk
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;

/// Number of lock stripes in the collision map (a power of two)
pub const DEFAULT_SHARD_COUNT: usize = 64;

// =============================================================================
// Policy defaults
// =============================================================================

/// Literal prepended to every candidate before hashing in prefix search
pub const DEFAULT_PREFIX_TAG: &str = "bitcoin";

/// Default second preimage target
pub const DEFAULT_PREIMAGE_TARGET: &str = "eliam";

/// Default digest prefixes searched by the prefix tool
pub const DEFAULT_PREFIXES: [&str; 3] = ["cafe", "faded", "decade"];

// =============================================================================
// Logging
// =============================================================================

/// Log filter used by the CLI tools when `RUST_LOG` is unset
pub const LOG_FILTER_DEFAULT: &str = "info";

/// Log filter used by the CLI tools with `--verbose`
pub const LOG_FILTER_VERBOSE: &str = "hashsearch=debug,info";
