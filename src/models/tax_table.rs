//! Tax table models.
//!
//! This module contains the [`TaxBracket`] and [`TaxTable`] types produced by
//! the fixed-width table parser.

use serde::{Deserialize, Serialize};

/// One step of a withholding-tax table.
///
/// # Example
///
/// ```
/// use wage_engine::models::TaxBracket;
///
/// let bracket = TaxBracket { threshold: 10_000, tax_amount: 1_250 };
/// assert!(bracket.threshold > bracket.tax_amount);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The monthly salary at which this step starts.
    pub threshold: u32,
    /// The monthly tax amount associated with this step.
    pub tax_amount: u32,
}

/// A named table of brackets, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    /// The table identifier (e.g. "7100").
    pub name: String,
    /// The brackets, ascending by threshold.
    pub brackets: Vec<TaxBracket>,
}
