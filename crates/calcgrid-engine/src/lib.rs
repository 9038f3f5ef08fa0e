//! calcgrid_engine - Spreadsheet formula evaluation.

pub mod engine;
