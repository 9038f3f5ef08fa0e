//! Cell address parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet notation
//! (e.g., "A1", "B2", "AA100") and zero-indexed column/row coordinates.
//! Columns are bijective base-26: A=1 … Z=26, AA=27, and so on, with no
//! zero digit. Parsing is strict: uppercase letters followed by a 1-based
//! row number, nothing else.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Error returned when a string cannot be decoded as a cell address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed cell address: {0}")]
pub struct MalformedAddress(pub String);

/// A cell address as column and row indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub col: usize,
    pub row: usize,
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE
        .get_or_init(|| Regex::new(r"^([A-Z]+)([0-9]+)$").expect("address regex must compile"))
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { col, row }
    }

    /// Decode spreadsheet notation into an address.
    pub fn parse(name: &str) -> Result<CellRef, MalformedAddress> {
        let malformed = || MalformedAddress(name.to_string());

        let caps = address_re().captures(name).ok_or_else(malformed)?;
        let letters = &caps[1];
        let digits = &caps[2];

        let mut col = 0usize;
        for b in letters.bytes() {
            let digit = (b - b'A') as usize + 1;
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add(digit))
                .ok_or_else(malformed)?;
        }

        // Rows are 1-based; "A0" is not an address.
        let row = digits
            .parse::<usize>()
            .ok()
            .and_then(|r| r.checked_sub(1))
            .ok_or_else(malformed)?;

        Ok(CellRef::new(col - 1, row))
    }

    /// Convert a column index to spreadsheet letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_letters(col: usize) -> String {
        let mut letters = String::new();
        let mut n = col + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters
    }
}

impl std::str::FromStr for CellRef {
    type Err = MalformedAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_letters(self.col), self.row + 1)
    }
}
