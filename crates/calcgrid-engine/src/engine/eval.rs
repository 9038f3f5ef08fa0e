//! Cell evaluation and cycle guarding.
//!
//! [`evaluate`] is a pure function of the sheet snapshot: it holds no
//! state between calls, so callers decide whether to re-evaluate on every
//! read or cache a whole-sheet pass. Each top-level call carries its own
//! evaluation path; an address may appear on the path at most once, and a
//! formula whose resolution re-enters one terminates as [`CellValue::Circular`].

use std::fmt;

use super::arith;
use super::cell::Sheet;
use super::cell_ref::CellRef;
use super::format::{NumberFormat, format_number};
use super::substitute::substitute;

/// Result of evaluating one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellValue {
    /// A displayable value: literal content verbatim, or a formatted
    /// numeric result.
    Value(String),
    /// The formula's resolution revisited a cell already being resolved.
    Circular,
    /// The arithmetic produced a non-finite result.
    MathError,
    /// The substituted expression was not well-formed arithmetic.
    InvalidFormula,
}

impl CellValue {
    /// The value as a finite number, if it parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Value(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Whether this is one of the error sentinels.
    pub fn is_error(&self) -> bool {
        !matches!(self, CellValue::Value(_))
    }
}

impl fmt::Display for CellValue {
    /// Error sentinels render with a reserved `#` prefix, which literal
    /// cell content never receives.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Value(s) => f.write_str(s),
            CellValue::Circular => f.write_str("#CYCLE!"),
            CellValue::MathError => f.write_str("#NUM!"),
            CellValue::InvalidFormula => f.write_str("#ERR!"),
        }
    }
}

/// Evaluate the cell at `addr` against the sheet snapshot.
pub fn evaluate(sheet: &Sheet, addr: &CellRef) -> CellValue {
    let mut path = Vec::new();
    evaluate_with_path(sheet, addr, &mut path)
}

/// Evaluate free-standing cell content that is not stored at any address
/// (the CLI's one-shot mode). References inside it resolve normally.
pub fn evaluate_input(sheet: &Sheet, content: &str) -> CellValue {
    let mut path = Vec::new();
    eval_content(sheet, content, None, &mut path)
}

pub(crate) fn evaluate_with_path(
    sheet: &Sheet,
    addr: &CellRef,
    path: &mut Vec<CellRef>,
) -> CellValue {
    if path.contains(addr) {
        return CellValue::Circular;
    }

    // Clone out of the map entry so no shard guard is held while the
    // formula recurses into other cells.
    let Some((raw, format)) = sheet.get(addr).map(|cell| (cell.raw.clone(), cell.format)) else {
        // Missing addresses are empty content.
        return CellValue::Value(String::new());
    };

    if !raw.starts_with('=') {
        return CellValue::Value(raw);
    }

    path.push(addr.clone());
    let result = eval_formula(sheet, &raw[1..], format, path);
    path.pop();
    result
}

fn eval_content(
    sheet: &Sheet,
    content: &str,
    format: Option<NumberFormat>,
    path: &mut Vec<CellRef>,
) -> CellValue {
    match content.strip_prefix('=') {
        Some(body) => eval_formula(sheet, body, format, path),
        None => CellValue::Value(content.to_string()),
    }
}

fn eval_formula(
    sheet: &Sheet,
    body: &str,
    format: Option<NumberFormat>,
    path: &mut Vec<CellRef>,
) -> CellValue {
    let expression = match substitute(body.trim(), sheet, path) {
        Ok(expression) => expression,
        Err(sentinel) => return sentinel,
    };

    match arith::eval_expr(&expression) {
        Ok(n) if n.is_finite() => CellValue::Value(format_number(n, format.unwrap_or_default())),
        Ok(_) => CellValue::MathError,
        Err(_) => CellValue::InvalidFormula,
    }
}
