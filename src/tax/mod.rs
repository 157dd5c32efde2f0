//! Monthly withholding-tax tables.
//!
//! This module parses the fixed-width table text format and compiles each
//! table into a monthly tax lookup with linear extrapolation above the
//! highest bracket.

mod compiler;
mod parser;

pub use compiler::{CompiledTaxTable, DEFAULT_EXTRAPOLATION_RATE, TaxTableSet, TaxYears};
pub use parser::{MONTHLY_PERIOD, WAGE_ROW, parse_tax_tables};
