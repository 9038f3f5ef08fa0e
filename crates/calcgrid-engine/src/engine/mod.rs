//! Formula evaluation engine.
//!
//! This module turns raw cell content (literal text or a formula string)
//! into a displayed value:
//!
//! - [`CellRef`] - Cell address parsing (A1 notation ↔ column/row indices)
//! - [`Cell`], [`Sheet`] - Sparse storage for raw cell content
//! - [`resolve_range`] - Expand range expressions into cell addresses
//! - [`evaluate`] - Resolve a cell to its display value, guarding cycles
//! - [`eval_expr`] - Evaluate a substituted arithmetic expression
//! - [`NumberFormat`], [`format_number`] - Render numeric results

mod arith;
mod cell;
mod cell_ref;
mod eval;
mod format;
mod range;
mod substitute;

pub use arith::{ExprError, eval_expr};
pub use cell::{Cell, MAX_COLS, MAX_ROWS, Sheet, in_bounds, new_sheet};
pub use cell_ref::{CellRef, MalformedAddress};
pub use eval::{CellValue, evaluate, evaluate_input};
pub use format::{NumberFormat, format_number};
pub use range::resolve_range;
