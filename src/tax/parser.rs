//! Fixed-width tax table parsing.
//!
//! Each line of a table file is one record with the byte layout:
//!
//! ```text
//! 0    4 5 6    11   16
//! |name|p|r|sal  |tax  |
//! ```
//!
//! where `p` is the period code and `r` the row-type code. Only monthly wage
//! rows (`p == "1"`, `r == "0"`) become brackets; every other row still
//! delimits tables.

use std::ops::Range;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBracket, TaxTable};

const NAME: Range<usize> = 0..4;
const PERIOD: Range<usize> = 4..5;
const ROW_TYPE: Range<usize> = 5..6;
const SALARY: Range<usize> = 6..11;
const TAX: Range<usize> = 11..16;

/// Period code for monthly tables.
pub const MONTHLY_PERIOD: &str = "1";

/// Row-type code for wage rows.
pub const WAGE_ROW: &str = "0";

/// A single decoded line of a table file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record<'a> {
    name: &'a str,
    period: &'a str,
    row_type: &'a str,
    bracket: TaxBracket,
}

impl Record<'_> {
    fn is_monthly_wage_row(&self) -> bool {
        self.period == MONTHLY_PERIOD && self.row_type == WAGE_ROW
    }
}

/// Parses fixed-width tax table text into tables of monthly wage brackets.
///
/// # Arguments
///
/// * `text` - The raw file contents, one record per line
///
/// # Returns
///
/// The tables in order of appearance, each with its brackets in source
/// order. A name that reappears after another table starts a new table with
/// the same name. Tables whose records were all filtered out are dropped.
///
/// # Errors
///
/// Returns [`EngineError::TaxTableParse`] if a record is shorter than its
/// name and code columns or if a numeric field is not made of digits.
///
/// # Example
///
/// ```
/// use wage_engine::tax::parse_tax_tables;
///
/// let text = "7100100010000000\n7100100020000150\n7100110001000000\n";
/// let tables = parse_tax_tables(text).unwrap();
///
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].name, "7100");
/// assert_eq!(tables[0].brackets.len(), 2);
/// assert_eq!(tables[0].brackets[1].threshold, 200);
/// assert_eq!(tables[0].brackets[1].tax_amount, 150);
/// ```
pub fn parse_tax_tables(text: &str) -> EngineResult<Vec<TaxTable>> {
    let mut tables = Vec::new();
    let mut current: Option<TaxTable> = None;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_no = index + 1;
        let record = parse_record(line, line_no)?;

        let starts_table = current
            .as_ref()
            .is_none_or(|table| table.name != record.name);
        if starts_table {
            finish_table(current.take(), &mut tables);
            current = Some(TaxTable {
                name: record.name.to_string(),
                brackets: Vec::new(),
            });
        }

        if record.is_monthly_wage_row() {
            if let Some(table) = current.as_mut() {
                table.brackets.push(record.bracket);
            }
        }
    }
    finish_table(current, &mut tables);

    debug!(tables = tables.len(), "Parsed tax table text");
    Ok(tables)
}

fn finish_table(table: Option<TaxTable>, tables: &mut Vec<TaxTable>) {
    let Some(table) = table else {
        return;
    };
    if table.brackets.is_empty() {
        debug!(table = %table.name, "Dropping tax table without monthly wage rows");
    } else {
        tables.push(table);
    }
}

fn parse_record(line: &str, line_no: usize) -> EngineResult<Record<'_>> {
    if line.len() < ROW_TYPE.end {
        return Err(parse_error(
            line_no,
            format!(
                "record is {} bytes long, expected at least {}",
                line.len(),
                ROW_TYPE.end
            ),
        ));
    }

    let salary = column(line, SALARY, line_no)?;
    let tax = column(line, TAX, line_no)?;

    Ok(Record {
        name: column(line, NAME, line_no)?,
        period: column(line, PERIOD, line_no)?,
        row_type: column(line, ROW_TYPE, line_no)?,
        bracket: TaxBracket {
            threshold: parse_amount(salary, "salary", line_no)?,
            tax_amount: parse_amount(tax, "tax", line_no)?,
        },
    })
}

/// Slices a column, clamped to the end of the line.
fn column(line: &str, range: Range<usize>, line_no: usize) -> EngineResult<&str> {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).ok_or_else(|| {
        parse_error(
            line_no,
            format!("columns {}..{} split a multi-byte character", range.start, range.end),
        )
    })
}

/// Strips leading zeros; an empty remainder is zero.
fn parse_amount(field: &str, what: &str, line_no: usize) -> EngineResult<u32> {
    let digits = field.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error(
            line_no,
            format!("{} field '{}' is not numeric", what, field),
        ));
    }
    digits.parse().map_err(|_| {
        parse_error(
            line_no,
            format!("{} field '{}' is out of range", what, field),
        )
    })
}

fn parse_error(line: usize, message: String) -> EngineError {
    EngineError::TaxTableParse { line, message }
}
