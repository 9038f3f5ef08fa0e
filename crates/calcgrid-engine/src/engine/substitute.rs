//! Formula body substitution.
//!
//! Rewrites a formula body into pure arithmetic by resolving aggregate
//! calls and cell references to numeric literals. Aggregates go first:
//! their arguments are ranges, which the reference pass would otherwise
//! tear apart corner by corner.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::cell::Sheet;
use super::cell_ref::CellRef;
use super::eval::{self, CellValue};
use super::range::resolve_range;

/// Aggregate call over a single range argument, e.g. `SUM(A1:B3)` or
/// `average(C2)`. The function name is case-insensitive; addresses are not.
fn aggregate_re() -> &'static Regex {
    static AGGREGATE_RE: OnceLock<Regex> = OnceLock::new();
    AGGREGATE_RE.get_or_init(|| {
        Regex::new(r"\b(?i:(SUM|AVERAGE))\s*\(\s*([A-Z]+[0-9]+(?:\s*:\s*[A-Z]+[0-9]+)?)\s*\)")
            .expect("aggregate regex must compile")
    })
}

/// Bare cell reference token.
fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE
        .get_or_init(|| Regex::new(r"\b([A-Z]+[0-9]+)\b").expect("reference regex must compile"))
}

/// Substitute aggregate calls and cell references in a formula body with
/// numeric literals, resolving each operand through the evaluator.
///
/// Returns `Err(CellValue::Circular)` when any operand's resolution
/// re-enters an address already on the evaluation path: circularity
/// terminates the whole evaluation and is never coerced away.
pub(crate) fn substitute(
    body: &str,
    sheet: &Sheet,
    path: &mut Vec<CellRef>,
) -> Result<String, CellValue> {
    let mut circular = false;

    let with_aggregates = aggregate_re()
        .replace_all(body, |caps: &Captures| {
            let mut included = Vec::new();
            for addr in resolve_range(&caps[2]) {
                let value = eval::evaluate_with_path(sheet, &addr, path);
                if value == CellValue::Circular {
                    circular = true;
                    return "0".to_string();
                }
                // Text, empty cells, and error results are excluded from
                // the aggregate, not treated as zero.
                if let Some(n) = value.as_number() {
                    included.push(n);
                }
            }

            let result = match caps[1].to_ascii_uppercase().as_str() {
                "SUM" => included.iter().sum::<f64>(),
                _ if included.is_empty() => 0.0,
                _ => included.iter().sum::<f64>() / included.len() as f64,
            };
            result.to_string()
        })
        .to_string();

    if circular {
        return Err(CellValue::Circular);
    }

    let with_references = reference_re()
        .replace_all(&with_aggregates, |caps: &Captures| {
            let resolved = match CellRef::parse(&caps[1]) {
                Ok(addr) => eval::evaluate_with_path(sheet, &addr, path),
                Err(err) => {
                    log::debug!("coercing unresolvable reference to 0: {err}");
                    return "0".to_string();
                }
            };
            if resolved == CellValue::Circular {
                circular = true;
                return "0".to_string();
            }
            // Unresolved and error references coerce to zero. This masks
            // errors in referenced cells; see the tests that pin it down.
            match resolved.as_number() {
                Some(n) => n.to_string(),
                None => "0".to_string(),
            }
        })
        .to_string();

    if circular {
        return Err(CellValue::Circular);
    }

    Ok(with_references)
}
