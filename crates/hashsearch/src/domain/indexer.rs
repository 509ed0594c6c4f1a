//! Index to candidate mapping
//!
//! Candidates are the base-`radix` digits of an index, least-significant digit
//! first, rendered through the alphabet.
//!
//! - Fixed encoding: exactly `max_len` characters, high positions padded with
//!   the alphabet's first symbol. Bijective over `[0, radix^max_len)`.
//! - Variable encoding: only the significant digits, `0` maps to a single
//!   first symbol. Injective over all of `u64`.

use crate::domain::alphabet::Alphabet;
use crate::domain::config::{ConfigError, Encoding, SearchConfig, fixed_space_size};

/// Deterministic mapping between indices and candidate strings
#[derive(Clone, Debug)]
pub struct Indexer {
    alphabet: Alphabet,
    max_len: usize,
}

impl Indexer {
    /// Create an indexer for `max_len`-character fixed candidates
    pub fn new(alphabet: Alphabet, max_len: usize) -> Result<Self, ConfigError> {
        if max_len == 0 {
            return Err(ConfigError::ZeroMaxLen);
        }
        Ok(Self { alphabet, max_len })
    }

    /// Create an indexer from a search configuration
    pub fn from_config(config: &SearchConfig) -> Result<Self, ConfigError> {
        Self::new(config.alphabet.clone(), config.max_len)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Size of the fixed-encoding space (`radix^max_len`)
    pub fn space_size(&self) -> Result<u64, ConfigError> {
        fixed_space_size(self.alphabet.radix(), self.max_len)
    }

    // =========================================================================
    // Fixed encoding
    // =========================================================================

    /// Encode `n` as a fixed-width candidate
    ///
    /// Only meaningful for `n < radix^max_len`; digits above `max_len` are
    /// dropped.
    pub fn encode(&self, n: u64) -> String {
        let mut buf = String::with_capacity(self.max_len);
        self.encode_into(n, &mut buf);
        buf
    }

    /// Encode `n` into `buf`, replacing its contents
    #[inline]
    pub fn encode_into(&self, mut n: u64, buf: &mut String) {
        buf.clear();
        let radix = self.alphabet.radix();
        for _ in 0..self.max_len {
            buf.push(self.alphabet.symbol(n % radix) as char);
            n /= radix;
        }
    }

    /// Inverse of [`encode`](Self::encode)
    ///
    /// Returns `None` if `s` has the wrong length, contains symbols outside the
    /// alphabet, or does not fit in a `u64`.
    pub fn decode(&self, s: &str) -> Option<u64> {
        if s.len() != self.max_len {
            return None;
        }
        self.digits_to_index(s)
    }

    // =========================================================================
    // Variable encoding
    // =========================================================================

    /// Encode `n` with only its significant digits
    pub fn encode_variable(&self, n: u64) -> String {
        let mut buf = String::new();
        self.encode_variable_into(n, &mut buf);
        buf
    }

    /// Encode `n` into `buf` with only its significant digits
    #[inline]
    pub fn encode_variable_into(&self, mut n: u64, buf: &mut String) {
        buf.clear();
        if n == 0 {
            buf.push(self.alphabet.zero() as char);
            return;
        }
        let radix = self.alphabet.radix();
        while n > 0 {
            buf.push(self.alphabet.symbol(n % radix) as char);
            n /= radix;
        }
    }

    /// Inverse of [`encode_variable`](Self::encode_variable)
    ///
    /// Only canonical strings decode: a multi-character string whose last
    /// (most significant) symbol is the zero symbol is never produced by the
    /// encoder and yields `None`.
    pub fn decode_variable(&self, s: &str) -> Option<u64> {
        let bytes = s.as_bytes();
        match bytes {
            [] => None,
            [.., last] if bytes.len() > 1 && *last == self.alphabet.zero() => None,
            _ => self.digits_to_index(s),
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Encode `n` into `buf` using the given encoding
    #[inline]
    pub fn encode_with(&self, encoding: Encoding, n: u64, buf: &mut String) {
        match encoding {
            Encoding::Fixed => self.encode_into(n, buf),
            Encoding::Variable => self.encode_variable_into(n, buf),
        }
    }

    /// Decode `s` using the given encoding
    pub fn decode_with(&self, encoding: Encoding, s: &str) -> Option<u64> {
        match encoding {
            Encoding::Fixed => self.decode(s),
            Encoding::Variable => self.decode_variable(s),
        }
    }

    fn digits_to_index(&self, s: &str) -> Option<u64> {
        let radix = self.alphabet.radix();
        s.bytes().rev().try_fold(0u64, |acc, b| {
            let digit = self.alphabet.digit(b)?;
            acc.checked_mul(radix)?.checked_add(digit)
        })
    }
}
