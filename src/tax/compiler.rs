//! Tax table compilation and lookup.
//!
//! A [`CompiledTaxTable`] turns the ascending brackets of a [`TaxTable`] into
//! a step function over monthly salary. The amount printed next to a
//! threshold becomes payable once salary reaches the *next* threshold, and
//! salaries at or above the last threshold are extrapolated at a marginal
//! rate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBracket, TaxTable};

use super::parser::parse_tax_tables;

/// Default marginal rate applied above the highest bracket (54%).
pub const DEFAULT_EXTRAPOLATION_RATE: Decimal = Decimal::from_parts(54, 0, 0, false, 2);

/// A tax table compiled into a monthly tax lookup.
///
/// # Example
///
/// ```
/// use wage_engine::models::{TaxBracket, TaxTable};
/// use wage_engine::tax::{CompiledTaxTable, DEFAULT_EXTRAPOLATION_RATE};
/// use rust_decimal::Decimal;
///
/// let table = TaxTable {
///     name: "7100".to_string(),
///     brackets: vec![
///         TaxBracket { threshold: 100, tax_amount: 10 },
///         TaxBracket { threshold: 200, tax_amount: 30 },
///         TaxBracket { threshold: 300, tax_amount: 60 },
///     ],
/// };
/// let compiled = CompiledTaxTable::compile(table, DEFAULT_EXTRAPOLATION_RATE).unwrap();
///
/// assert_eq!(compiled.monthly_tax(99), Decimal::ZERO);
/// assert_eq!(compiled.monthly_tax(150), Decimal::ZERO);
/// assert_eq!(compiled.monthly_tax(250), Decimal::from(10));
/// assert_eq!(compiled.monthly_tax(310), Decimal::new(654, 1)); // 60 + 10 * 0.54
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledTaxTable {
    name: String,
    brackets: Vec<TaxBracket>,
    extrapolation_rate: Decimal,
}

impl CompiledTaxTable {
    /// Compiles a table into a lookup.
    ///
    /// # Arguments
    ///
    /// * `table` - The parsed table
    /// * `extrapolation_rate` - The marginal rate applied above the last threshold
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxTable`] if the table has no brackets,
    /// if its thresholds are not strictly ascending, or if the rate is negative.
    pub fn compile(table: TaxTable, extrapolation_rate: Decimal) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidTaxTable {
            name: table.name.clone(),
            message,
        };

        if table.brackets.is_empty() {
            return Err(invalid("table has no brackets".to_string()));
        }
        if extrapolation_rate.is_sign_negative() {
            return Err(invalid(format!(
                "extrapolation rate {} is negative",
                extrapolation_rate
            )));
        }
        if let Some(pair) = table
            .brackets
            .windows(2)
            .find(|pair| pair[0].threshold >= pair[1].threshold)
        {
            return Err(invalid(format!(
                "threshold {} does not ascend from {}",
                pair[1].threshold, pair[0].threshold
            )));
        }

        Ok(Self {
            name: table.name,
            brackets: table.brackets,
            extrapolation_rate,
        })
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the brackets in ascending threshold order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the marginal rate used above the last threshold.
    pub fn extrapolation_rate(&self) -> Decimal {
        self.extrapolation_rate
    }

    /// Returns the monthly tax for a salary.
    ///
    /// - Below the first threshold the tax is zero.
    /// - Between thresholds `i` and `i + 1` the tax is the amount of bracket
    ///   `i - 1` (zero for the first bracket).
    /// - At or above the last threshold the tax is the last amount plus the
    ///   excess salary times the extrapolation rate.
    ///
    /// No rounding is applied.
    pub fn monthly_tax(&self, salary: u64) -> Decimal {
        // Number of brackets whose threshold has been reached.
        let reached = self
            .brackets
            .partition_point(|b| u64::from(b.threshold) <= salary);

        if reached == 0 {
            return Decimal::ZERO;
        }
        if reached == self.brackets.len() {
            let last = &self.brackets[reached - 1];
            let excess = salary - u64::from(last.threshold);
            return Decimal::from(last.tax_amount) + Decimal::from(excess) * self.extrapolation_rate;
        }
        match reached {
            1 => Decimal::ZERO,
            n => Decimal::from(self.brackets[n - 2].tax_amount),
        }
    }
}

/// The compiled tables of one tax year, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxTableSet {
    year: i32,
    tables: BTreeMap<String, CompiledTaxTable>,
}

impl TaxTableSet {
    /// Compiles parsed tables for a year with a shared extrapolation rate.
    ///
    /// Tables that share a name are merged into the first one, with later
    /// brackets appended in source order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxTable`] if any merged table fails to
    /// compile, including when a later occurrence does not continue the
    /// ascending thresholds of the earlier ones.
    pub fn compile(
        year: i32,
        tables: Vec<TaxTable>,
        extrapolation_rate: Decimal,
    ) -> EngineResult<Self> {
        let mut merged: BTreeMap<String, TaxTable> = BTreeMap::new();
        for table in tables {
            match merged.get_mut(&table.name) {
                Some(first) => {
                    debug!(year, table = %table.name, "Merging repeated tax table");
                    first.brackets.extend(table.brackets);
                }
                None => {
                    merged.insert(table.name.clone(), table);
                }
            }
        }

        let mut compiled = BTreeMap::new();
        for (name, table) in merged {
            compiled.insert(name, CompiledTaxTable::compile(table, extrapolation_rate)?);
        }

        debug!(year, tables = compiled.len(), "Compiled tax tables");
        Ok(Self {
            year,
            tables: compiled,
        })
    }

    /// Parses fixed-width table text and compiles every table in it.
    ///
    /// # Example
    ///
    /// ```
    /// use wage_engine::tax::{TaxTableSet, DEFAULT_EXTRAPOLATION_RATE};
    ///
    /// let text = "7101100010000000\n7100100010000000\n";
    /// let set = TaxTableSet::from_source(2023, text, DEFAULT_EXTRAPOLATION_RATE)?;
    /// assert_eq!(set.table_names(), vec!["7100", "7101"]);
    /// assert!(set.table("7300").is_err());
    /// # Ok::<(), wage_engine::error::EngineError>(())
    /// ```
    pub fn from_source(year: i32, text: &str, extrapolation_rate: Decimal) -> EngineResult<Self> {
        let tables = parse_tax_tables(text)?;
        Self::compile(year, tables, extrapolation_rate)
    }

    /// Returns the tax year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Returns the number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the year has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Looks up a compiled table by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTable`] for an unrecognized name.
    pub fn table(&self, name: &str) -> EngineResult<&CompiledTaxTable> {
        self.tables
            .get(name)
            .ok_or_else(|| EngineError::UnknownTable {
                year: self.year,
                name: name.to_string(),
            })
    }

    /// Returns the monthly tax for a salary under the named table.
    pub fn monthly_tax(&self, salary: u64, table: &str) -> EngineResult<Decimal> {
        Ok(self.table(table)?.monthly_tax(salary))
    }
}

/// The compiled tax table sets of every configured year.
#[derive(Debug, Clone, Default)]
pub struct TaxYears {
    years: BTreeMap<i32, TaxTableSet>,
}

impl TaxYears {
    /// Creates a registry from compiled sets.
    pub fn new(sets: impl IntoIterator<Item = TaxTableSet>) -> Self {
        let years: BTreeMap<i32, TaxTableSet> =
            sets.into_iter().map(|set| (set.year(), set)).collect();
        info!(years = years.len(), "Tax table sets ready");
        Self { years }
    }

    /// Returns the years that have compiled tables, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    /// Returns the set for a year.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownYear`] if no tables were loaded for the year.
    pub fn for_year(&self, year: i32) -> EngineResult<&TaxTableSet> {
        self.years
            .get(&year)
            .ok_or(EngineError::UnknownYear { year })
    }

    /// Returns the monthly tax for a salary under a year's named table.
    pub fn monthly_tax(&self, year: i32, table: &str, salary: u64) -> EngineResult<Decimal> {
        self.for_year(year)?.monthly_tax(salary, table)
    }
}
