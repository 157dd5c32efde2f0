//! Core data models for the Wage Engine.
//!
//! This module contains the calendar, holiday and tax table models shared
//! by the rest of the engine.

mod calendar;
mod holiday;
mod tax_table;

pub use calendar::{CalendarYear, DayClassification, DayEntry, MonthGroup};
pub use holiday::{HolidayKind, PublicHoliday};
pub use tax_table::{TaxBracket, TaxTable};
