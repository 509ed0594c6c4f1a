//! Search configuration
//!
//! All tunables of a search are carried explicitly in [`SearchConfig`]
//! instead of living in module-level state.

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LEN};
use crate::domain::alphabet::Alphabet;
use std::ops::Range;
use thiserror::Error;

/// Candidate encoding used by the indexer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Exactly `max_len` characters, padded with the first symbol
    #[default]
    Fixed,
    /// No padding, length grows with the index
    Variable,
}

/// Configuration errors, reported before any worker starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("maximum candidate length must be at least 1")]
    ZeroMaxLen,
    #[error("alphabet is empty")]
    EmptyAlphabet,
    #[error("alphabet needs at least 2 symbols, got {0}")]
    AlphabetTooSmall(usize),
    #[error("alphabet contains '{0}' more than once")]
    DuplicateSymbol(char),
    #[error("alphabet symbol {0:?} is not printable ASCII")]
    InvalidSymbol(char),
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("{radix}^{max_len} candidates do not fit in a 64-bit index")]
    SpaceOverflow { radix: u64, max_len: usize },
    #[error("search range {start}..{end} is empty")]
    EmptyRange { start: u64, end: u64 },
    #[error("search range ends at {end}, beyond the {space} candidates of the space")]
    RangeOutOfSpace { end: u64, space: u64 },
    #[error("target prefix is empty")]
    EmptyPrefix,
}

/// Parameters of one search invocation
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Symbols candidates are built from
    pub alphabet: Alphabet,
    /// Candidate length in fixed encoding
    pub max_len: usize,
    /// Fixed-width or variable-length candidates
    pub encoding: Encoding,
    /// Indices per unit of work
    pub chunk_size: u64,
    /// Worker threads (None = available hardware parallelism)
    pub workers: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            max_len: DEFAULT_MAX_LEN,
            encoding: Encoding::Fixed,
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: None,
        }
    }
}

impl SearchConfig {
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// Check all parameters that do not depend on the search range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_len == 0 {
            return Err(ConfigError::ZeroMaxLen);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        self.space_size().map(|_| ())
    }

    /// Number of addressable indices for the configured encoding
    ///
    /// Fixed encoding covers `radix^max_len` indices; variable encoding
    /// covers `[0, u64::MAX)`.
    pub fn space_size(&self) -> Result<u64, ConfigError> {
        match self.encoding {
            Encoding::Variable => Ok(u64::MAX),
            Encoding::Fixed => fixed_space_size(self.alphabet.radix(), self.max_len),
        }
    }

    /// Check that a range is non-empty and addressable
    pub fn validate_range(&self, range: &Range<u64>) -> Result<(), ConfigError> {
        if range.start >= range.end {
            return Err(ConfigError::EmptyRange {
                start: range.start,
                end: range.end,
            });
        }

        let space = self.space_size()?;
        if range.end > space {
            return Err(ConfigError::RangeOutOfSpace {
                end: range.end,
                space,
            });
        }

        Ok(())
    }
}

/// `radix^max_len`, or an error when it overflows `u64`
pub fn fixed_space_size(radix: u64, max_len: usize) -> Result<u64, ConfigError> {
    if max_len == 0 {
        return Err(ConfigError::ZeroMaxLen);
    }
    u32::try_from(max_len)
        .ok()
        .and_then(|exp| radix.checked_pow(exp))
        .ok_or(ConfigError::SpaceOverflow { radix, max_len })
}
