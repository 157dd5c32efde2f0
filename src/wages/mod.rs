//! Wage tracking over a calendar year.
//!
//! This module wraps a [`CalendarYear`](crate::models::CalendarYear) into
//! editable per-day hours and exposes month and year totals that are always
//! recomputed from the current hours.

mod day;
mod state;

pub use day::{DEFAULT_WORKDAY_HOURS, DayState, DayType, MAX_DAY_HOURS};
pub use state::{DaySummary, MonthState, MonthSummary, YearState, YearSummary};
