//! Display formatting for computed numeric results.

use serde::{Deserialize, Serialize};

/// Number format tag attached to a cell by the styling surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    #[default]
    General,
    Currency,
    Percentage,
    Thousands,
}

impl NumberFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse(name: &str) -> Option<NumberFormat> {
        match name.trim().to_ascii_lowercase().as_str() {
            "general" => Some(NumberFormat::General),
            "currency" => Some(NumberFormat::Currency),
            "percentage" => Some(NumberFormat::Percentage),
            "thousands" => Some(NumberFormat::Thousands),
            _ => None,
        }
    }
}

/// Format a finite number for display.
///
/// `General` and `Percentage` render up to two decimals with trailing
/// fractional zeros trimmed; `Currency` keeps a fixed two. Percentages
/// treat the value as a raw fraction (0.5 renders as "50%").
pub fn format_number(n: f64, format: NumberFormat) -> String {
    match format {
        NumberFormat::General => trim_decimals(format!("{:.2}", n)),
        NumberFormat::Currency => format!("${:.2}", n),
        NumberFormat::Percentage => {
            format!("{}%", trim_decimals(format!("{:.2}", n * 100.0)))
        }
        NumberFormat::Thousands => group_thousands(trim_decimals(format!("{:.2}", n))),
    }
}

/// Trim trailing fractional zeros, then a dangling decimal point.
fn trim_decimals(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Insert comma separators into the integer part of a rendered number.
fn group_thousands(s: String) -> String {
    let (number, fraction) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s.as_str(), None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
