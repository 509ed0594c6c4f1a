//! Hash function implementations
//!
//! The search engine treats a hash function as an opaque `bytes -> digest`
//! mapping. Digests are rendered as lowercase hex strings and are only ever
//! compared for equality or by prefix.

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque digest function
pub trait HashFn: Send + Sync {
    /// Hash `input` and render the digest as text
    fn digest(&self, input: &[u8]) -> String;
}

impl<F> HashFn for F
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    #[inline]
    fn digest(&self, input: &[u8]) -> String {
        self(input)
    }
}

/// 32-bit polynomial rolling hash
///
/// `h = h * 31 + byte`, wrapping, starting from 0. Rendered as 8 lowercase
/// hex characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleHash;

impl SimpleHash {
    /// Raw 32-bit hash value
    #[inline]
    pub fn hash_u32(input: &[u8]) -> u32 {
        input.iter().fold(0u32, |h, &b| {
            (h << 5).wrapping_sub(h).wrapping_add(b as u32)
        })
    }
}

impl HashFn for SimpleHash {
    #[inline]
    fn digest(&self, input: &[u8]) -> String {
        format!("{:08x}", Self::hash_u32(input))
    }
}

/// SHA-256 rendered as 64 lowercase hex characters
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hex;

impl HashFn for Sha256Hex {
    #[inline]
    fn digest(&self, input: &[u8]) -> String {
        format!("{:x}", <Sha256 as Digest>::digest(input))
    }
}

// =============================================================================
// Named hash selection
// =============================================================================

/// Hash function selectable by name
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashKind {
    /// [`SimpleHash`]
    #[default]
    Simple,
    /// [`Sha256Hex`]
    Sha256,
}

impl HashKind {
    /// All selectable names
    pub const NAMES: [&'static str; 2] = ["simple", "sha256"];

    /// Length of the rendered digest in characters
    pub fn digest_len(self) -> usize {
        match self {
            Self::Simple => 8,
            Self::Sha256 => 64,
        }
    }
}

impl HashFn for HashKind {
    #[inline]
    fn digest(&self, input: &[u8]) -> String {
        match self {
            Self::Simple => SimpleHash.digest(input),
            Self::Sha256 => Sha256Hex.digest(input),
        }
    }
}

/// Unknown hash function name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hash function '{0}' (expected one of: simple, sha256)")]
pub struct UnknownHashKind(pub String);

impl FromStr for HashKind {
    type Err = UnknownHashKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(UnknownHashKind(s.to_string())),
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("simple"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}
