//! Search workflows
//!
//! One function per search kind. Each call builds a fresh policy and engine,
//! so no state survives between searches.

use crate::app::engine::{SearchEngine, SearchError, SearchOutcome};
use crate::app::policy::{Collision, CollisionPolicy, PrefixPolicy, SecondPreimagePolicy};
use crate::domain::config::{Encoding, SearchConfig};
use crate::domain::hash::HashFn;
use tracing::info;

/// Search for two candidates with equal digests
///
/// # Arguments
/// * `config` - Search configuration (encoding is forced to fixed)
/// * `hash` - Digest function
/// * `limit` - Number of indices to scan (None = the whole fixed space)
pub fn find_collision<H: HashFn>(
    config: SearchConfig,
    hash: H,
    limit: Option<u64>,
) -> Result<SearchOutcome<Collision>, SearchError> {
    let config = config.with_encoding(Encoding::Fixed);
    let limit = resolve_limit(&config, limit)?;
    let engine = SearchEngine::new(config)?;
    let policy = CollisionPolicy::new(hash);

    info!(limit, workers = engine.workers(), "searching for a collision");
    let outcome = engine.search(0..limit, &policy)?;
    info!(digests = policy.recorded(), "collision map discarded");

    Ok(outcome)
}

/// Search for a candidate other than `target` with the same digest
///
/// # Arguments
/// * `config` - Search configuration (encoding is forced to fixed)
/// * `hash` - Digest function
/// * `target` - The string whose digest must be matched (not the digest itself)
/// * `limit` - Number of indices to scan (None = the whole fixed space)
pub fn find_second_preimage<H: HashFn>(
    config: SearchConfig,
    hash: H,
    target: &str,
    limit: Option<u64>,
) -> Result<SearchOutcome<String>, SearchError> {
    let config = config.with_encoding(Encoding::Fixed);
    let limit = resolve_limit(&config, limit)?;
    let engine = SearchEngine::new(config)?;
    let policy = SecondPreimagePolicy::new(hash, target);

    info!(
        preimage = target,
        digest = policy.target_digest(),
        limit,
        workers = engine.workers(),
        "searching for a second preimage"
    );
    engine.search(0..limit, &policy)
}

/// Search for `tag + candidate` whose digest starts with `prefix`
///
/// Always uses variable-length candidates.
///
/// # Arguments
/// * `config` - Search configuration (encoding is overridden)
/// * `hash` - Digest function
/// * `prefix` - Digest prefix to match
/// * `tag` - Literal prepended to every candidate before hashing
/// * `limit` - Number of indices to scan (None = `u64::MAX`)
pub fn find_hash_prefix<H: HashFn>(
    config: SearchConfig,
    hash: H,
    prefix: &str,
    tag: &str,
    limit: Option<u64>,
) -> Result<SearchOutcome<String>, SearchError> {
    let config = config.with_encoding(Encoding::Variable);
    let limit = resolve_limit(&config, limit)?;
    let policy = PrefixPolicy::new(hash, prefix)?.with_tag(tag);
    let engine = SearchEngine::new(config)?;

    info!(
        prefix,
        tag,
        limit,
        workers = engine.workers(),
        "searching for a digest prefix"
    );
    engine.search(0..limit, &policy)
}

fn resolve_limit(config: &SearchConfig, limit: Option<u64>) -> Result<u64, SearchError> {
    match limit {
        Some(limit) => Ok(limit),
        None => Ok(config.space_size()?),
    }
}
