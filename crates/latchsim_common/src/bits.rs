//! Bit-string literals for signal traces.
//!
//! A trace is written one character per cycle: `1` for high, `0` for low and
//! `-` for a value that has not been supplied (yet).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A per-cycle sequence of optional boolean values.
///
/// Parses from strings like `"1101"` or `"10-1"` and displays back in the same
/// form. Whitespace and `_` separators are ignored when parsing, so long
/// traces may be grouped as `"1010_1100"`.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BitString(Vec<Option<bool>>);

impl BitString {
    /// Wraps a sequence of per-cycle values.
    pub fn new(values: Vec<Option<bool>>) -> Self {
        Self(values)
    }

    /// Builds a fully set bit string from booleans.
    pub fn from_bools(values: &[bool]) -> Self {
        Self(values.iter().copied().map(Some).collect())
    }

    /// Returns the per-cycle values.
    pub fn values(&self) -> &[Option<bool>] {
        &self.0
    }

    /// Consumes the bit string, returning its values.
    pub fn into_values(self) -> Vec<Option<bool>> {
        self.0
    }

    /// Number of cycles covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the bit string covers no cycle.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({self})")
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.0 {
            let c = match value {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Error type for parsing bit-string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitsError {
    /// The offending character.
    pub found: char,
    /// Character position of the offending character in the input.
    pub position: usize,
}

impl fmt::Display for ParseBitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid trace character '{}' at position {}",
            self.found, self.position
        )
    }
}

impl std::error::Error for ParseBitsError {}

impl FromStr for BitString {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '1' => values.push(Some(true)),
                '0' => values.push(Some(false)),
                '-' => values.push(None),
                '_' => {}
                c if c.is_whitespace() => {}
                found => return Err(ParseBitsError { found, position }),
            }
        }
        Ok(Self(values))
    }
}
