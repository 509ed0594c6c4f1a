//! Candidate alphabet
//!
//! An ordered set of distinct printable ASCII symbols. The position of a symbol
//! in the alphabet is its digit value in the indexer's number system.

use crate::constants::DEFAULT_ALPHABET;
use crate::domain::config::ConfigError;

/// Marker for bytes that are not part of the alphabet
const NOT_A_SYMBOL: u8 = u8::MAX;

/// Ordered symbol set with a reverse lookup table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    /// byte -> digit value, `NOT_A_SYMBOL` if absent
    digits: [u8; 256],
}

impl Alphabet {
    /// Build an alphabet from a string of distinct printable ASCII symbols
    ///
    /// At least two symbols are required so that the variable-length
    /// encoding terminates.
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        let mut digits = [NOT_A_SYMBOL; 256];
        let mut bytes = Vec::with_capacity(symbols.len());

        for c in symbols.chars() {
            if !c.is_ascii_graphic() {
                return Err(ConfigError::InvalidSymbol(c));
            }
            let b = c as u8;
            if digits[b as usize] != NOT_A_SYMBOL {
                return Err(ConfigError::DuplicateSymbol(c));
            }
            digits[b as usize] = bytes.len() as u8;
            bytes.push(b);
        }

        if bytes.len() < 2 {
            return Err(ConfigError::AlphabetTooSmall(bytes.len()));
        }

        Ok(Self {
            symbols: bytes,
            digits,
        })
    }

    /// Number of symbols
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of symbols as the indexer's radix
    #[inline]
    pub fn radix(&self) -> u64 {
        self.symbols.len() as u64
    }

    /// Symbol for a digit value
    #[inline]
    pub(crate) fn symbol(&self, digit: u64) -> u8 {
        self.symbols[digit as usize]
    }

    /// First symbol (digit value zero)
    #[inline]
    pub fn zero(&self) -> u8 {
        self.symbols[0]
    }

    /// Digit value of a symbol, if it belongs to the alphabet
    #[inline]
    pub fn digit(&self, symbol: u8) -> Option<u64> {
        match self.digits[symbol as usize] {
            NOT_A_SYMBOL => None,
            d => Some(d as u64),
        }
    }

    /// Symbols as a string slice
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let mut digits = [NOT_A_SYMBOL; 256];
        for (i, &b) in DEFAULT_ALPHABET.as_bytes().iter().enumerate() {
            digits[b as usize] = i as u8;
        }
        Self {
            symbols: DEFAULT_ALPHABET.as_bytes().to_vec(),
            digits,
        }
    }
}
