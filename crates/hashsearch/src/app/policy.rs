//! Search policies
//!
//! A policy decides, for every candidate the engine produces, whether it is a
//! hit. It also owns the hash function, so the engine never needs to know what
//! string is actually hashed.

use crate::constants::{DEFAULT_PREFIX_TAG, DEFAULT_SHARD_COUNT};
use crate::domain::config::ConfigError;
use crate::domain::hash::HashFn;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use std::fmt;

/// Per-candidate decision logic driven by the search engine
pub trait SearchPolicy: Sync {
    /// Payload reported on a hit
    type Hit: Send + Sync;

    /// Digest of the string this policy hashes for `candidate`
    fn digest(&self, candidate: &str) -> String;

    /// Decide whether `candidate` (with its `digest`) is a hit
    fn evaluate(&self, candidate: &str, digest: &str) -> Option<Self::Hit>;

    /// Re-check a payload independently of the engine
    fn verify(&self, hit: &Self::Hit) -> bool;
}

// =============================================================================
// Collision
// =============================================================================

/// Two distinct candidates with the same digest
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    /// Candidate that detected the collision
    pub first: String,
    /// Candidate stored earlier under the same digest
    pub second: String,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\", \"{}\"", self.first, self.second)
    }
}

/// Finds any two candidates whose digests are equal
///
/// Every evaluated candidate is recorded in a shared `digest -> candidate`
/// map. The map lives as long as the policy and is never cleared, so a policy
/// is single-use: build a new one for every search, or digests from an
/// earlier search will be reported against candidates of the next one.
pub struct CollisionPolicy<H> {
    hash: H,
    seen: DashMap<String, String, FxBuildHasher>,
}

impl<H: HashFn> CollisionPolicy<H> {
    pub fn new(hash: H) -> Self {
        Self::with_shards(hash, DEFAULT_SHARD_COUNT)
    }

    /// Create a policy whose map uses `shards` lock stripes
    ///
    /// The count is rounded up to a power of two (at least 2).
    pub fn with_shards(hash: H, shards: usize) -> Self {
        let shards = shards.max(2).next_power_of_two();
        Self {
            hash,
            seen: DashMap::with_hasher_and_shard_amount(FxBuildHasher, shards),
        }
    }

    /// Number of distinct digests recorded so far
    pub fn recorded(&self) -> usize {
        self.seen.len()
    }
}

impl<H: HashFn> SearchPolicy for CollisionPolicy<H> {
    type Hit = Collision;

    #[inline]
    fn digest(&self, candidate: &str) -> String {
        self.hash.digest(candidate.as_bytes())
    }

    fn evaluate(&self, candidate: &str, digest: &str) -> Option<Collision> {
        // Lookup and insert happen under one shard lock.
        match self.seen.entry(digest.to_owned()) {
            Entry::Occupied(stored) => (stored.get() != candidate).then(|| Collision {
                first: candidate.to_string(),
                second: stored.get().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(candidate.to_string());
                None
            }
        }
    }

    fn verify(&self, hit: &Collision) -> bool {
        hit.first != hit.second
            && self.hash.digest(hit.first.as_bytes()) == self.hash.digest(hit.second.as_bytes())
    }
}

// =============================================================================
// Second preimage
// =============================================================================

/// Finds a candidate, other than the target, with the target's digest
pub struct SecondPreimagePolicy<H> {
    hash: H,
    target: String,
    target_digest: String,
}

impl<H: HashFn> SecondPreimagePolicy<H> {
    pub fn new(hash: H, target: impl Into<String>) -> Self {
        let target = target.into();
        let target_digest = hash.digest(target.as_bytes());
        Self {
            hash,
            target,
            target_digest,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn target_digest(&self) -> &str {
        &self.target_digest
    }
}

impl<H: HashFn> SearchPolicy for SecondPreimagePolicy<H> {
    type Hit = String;

    #[inline]
    fn digest(&self, candidate: &str) -> String {
        self.hash.digest(candidate.as_bytes())
    }

    #[inline]
    fn evaluate(&self, candidate: &str, digest: &str) -> Option<String> {
        (digest == self.target_digest && candidate != self.target).then(|| candidate.to_string())
    }

    fn verify(&self, hit: &String) -> bool {
        *hit != self.target && self.hash.digest(hit.as_bytes()) == self.target_digest
    }
}

// =============================================================================
// Digest prefix
// =============================================================================

/// Finds a tagged candidate whose digest starts with a target prefix
///
/// The hashed string is `tag + candidate`; the reported payload is that
/// tagged string.
pub struct PrefixPolicy<H> {
    hash: H,
    prefix: String,
    tag: String,
}

impl<H: HashFn> PrefixPolicy<H> {
    /// Create a policy with the default tag
    pub fn new(hash: H, prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(Self {
            hash,
            prefix,
            tag: DEFAULT_PREFIX_TAG.to_string(),
        })
    }

    /// Replace the literal prepended to every candidate
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn tagged(&self, candidate: &str) -> String {
        let mut input = String::with_capacity(self.tag.len() + candidate.len());
        input.push_str(&self.tag);
        input.push_str(candidate);
        input
    }
}

impl<H: HashFn> SearchPolicy for PrefixPolicy<H> {
    type Hit = String;

    #[inline]
    fn digest(&self, candidate: &str) -> String {
        self.hash.digest(self.tagged(candidate).as_bytes())
    }

    #[inline]
    fn evaluate(&self, candidate: &str, digest: &str) -> Option<String> {
        digest
            .starts_with(self.prefix.as_str())
            .then(|| self.tagged(candidate))
    }

    fn verify(&self, hit: &String) -> bool {
        hit.starts_with(self.tag.as_str())
            && self.hash.digest(hit.as_bytes()).starts_with(self.prefix.as_str())
    }
}
