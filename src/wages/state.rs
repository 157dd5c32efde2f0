//! Month and year wage state.
//!
//! [`YearState`] owns the [`DayState`]s of one calendar year, grouped by
//! month. Every total is recomputed from the current day states when read,
//! so a read after [`YearState::set_hours`] always sees the new value.

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarYear, MonthGroup};

use super::day::{DayState, DayType};

/// A snapshot of one day's wage state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The date.
    pub date: NaiveDate,
    /// The logged hours.
    pub hours: Decimal,
    /// The derived day type.
    pub day_type: DayType,
}

impl From<&DayState> for DaySummary {
    fn from(day: &DayState) -> Self {
        Self {
            date: day.date(),
            hours: day.hours(),
            day_type: day.day_type(),
        }
    }
}

/// A snapshot of a month's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// The month number (1 = January).
    pub month: u32,
    /// The canonical English month name.
    pub name: String,
    /// The sum of logged hours.
    pub total_hours: Decimal,
    /// The number of workdays with hours logged.
    pub work_days: usize,
    /// The number of weekend days and holidays.
    pub off_days: usize,
    /// The number of workdays with no hours logged.
    pub vacation_days: usize,
}

/// A snapshot of a year's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    /// The calendar year.
    pub year: i32,
    /// The sum of logged hours.
    pub total_hours: Decimal,
    /// The number of workdays with hours logged.
    pub work_days: usize,
    /// The number of weekend days and holidays.
    pub off_days: usize,
    /// The number of workdays with no hours logged.
    pub vacation_days: usize,
    /// The per-month totals in calendar order.
    pub months: Vec<MonthSummary>,
}

/// The editable days of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthState {
    month: Month,
    days: Vec<DayState>,
}

impl MonthState {
    fn new(group: &MonthGroup, default_workday_hours: Decimal) -> Self {
        Self {
            month: group.month(),
            days: group
                .days()
                .iter()
                .map(|entry| DayState::new(*entry, default_workday_hours))
                .collect(),
        }
    }

    /// Returns the month.
    pub fn month(&self) -> Month {
        self.month
    }

    /// Returns the canonical English month name.
    pub fn name(&self) -> &'static str {
        self.month.name()
    }

    /// Returns the day states in date order.
    pub fn days(&self) -> &[DayState] {
        &self.days
    }

    /// Returns the sum of logged hours.
    pub fn total_hours(&self) -> Decimal {
        self.days.iter().map(DayState::hours).sum()
    }

    /// Returns the number of days of a type.
    pub fn count(&self, day_type: DayType) -> usize {
        self.days.iter().filter(|d| d.day_type() == day_type).count()
    }

    /// Returns the number of workdays with hours logged.
    pub fn work_days(&self) -> usize {
        self.count(DayType::Workday)
    }

    /// Returns the number of off days.
    pub fn off_days(&self) -> usize {
        self.count(DayType::OffDay)
    }

    /// Returns the number of vacation days.
    pub fn vacation_days(&self) -> usize {
        self.count(DayType::Vacation)
    }

    /// Snapshots the month's totals.
    pub fn summary(&self) -> MonthSummary {
        MonthSummary {
            month: self.month.number_from_month(),
            name: self.name().to_string(),
            total_hours: self.total_hours(),
            work_days: self.work_days(),
            off_days: self.off_days(),
            vacation_days: self.vacation_days(),
        }
    }
}

/// The editable wage state of a calendar year.
///
/// Built from a [`CalendarYear`] without modifying it. Intended to be owned
/// by a single session.
///
/// # Example
///
/// ```
/// use wage_engine::calendar::{build_calendar_year, NorwegianHolidays};
/// use wage_engine::wages::{DayType, YearState, DEFAULT_WORKDAY_HOURS};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let calendar = build_calendar_year(2023, "NO", &NorwegianHolidays)?;
/// let mut state = YearState::new(&calendar, DEFAULT_WORKDAY_HOURS);
/// let before = state.total_hours();
///
/// // 2023-03-01 is a Wednesday
/// let date = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
/// state.set_hours(date, Decimal::ZERO)?;
///
/// assert_eq!(state.day(date)?.day_type(), DayType::Vacation);
/// assert_eq!(state.total_hours(), before - DEFAULT_WORKDAY_HOURS);
/// assert_eq!(state.vacation_days(), 1);
/// # Ok::<(), wage_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearState {
    year: i32,
    months: Vec<MonthState>,
}

impl YearState {
    /// Wraps a calendar year, logging `default_workday_hours` on each workday.
    pub fn new(calendar: &CalendarYear, default_workday_hours: Decimal) -> Self {
        Self {
            year: calendar.year(),
            months: calendar
                .months()
                .iter()
                .map(|group| MonthState::new(group, default_workday_hours))
                .collect(),
        }
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the twelve months in calendar order.
    pub fn months(&self) -> &[MonthState] {
        &self.months
    }

    /// Returns the state of one month.
    pub fn month(&self, month: Month) -> &MonthState {
        &self.months[month.number_from_month() as usize - 1]
    }

    /// Iterates over every day of the year in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayState> {
        self.months.iter().flat_map(|m| m.days.iter())
    }

    /// Returns the state of a day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DayNotInYear`] for a date in another year.
    pub fn day(&self, date: NaiveDate) -> EngineResult<&DayState> {
        self.index(date)
            .map(|(month, day)| &self.months[month].days[day])
    }

    /// Logs hours on a day and returns its updated state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHours`] for negative hours and
    /// [`EngineError::DayNotInYear`] for a date in another year. The state
    /// is unchanged on error.
    pub fn set_hours(&mut self, date: NaiveDate, hours: Decimal) -> EngineResult<&DayState> {
        let (month, day) = self.index(date)?;
        let day = &mut self.months[month].days[day];
        day.set_hours(hours)?;
        Ok(day)
    }

    fn index(&self, date: NaiveDate) -> EngineResult<(usize, usize)> {
        let month = date.month0() as usize;
        let day = date.day0() as usize;
        let in_year = date.year() == self.year
            && self
                .months
                .get(month)
                .is_some_and(|m| day < m.days.len());
        if in_year {
            Ok((month, day))
        } else {
            Err(EngineError::DayNotInYear {
                date,
                year: self.year,
            })
        }
    }

    /// Returns the sum of logged hours over all months.
    pub fn total_hours(&self) -> Decimal {
        self.months.iter().map(MonthState::total_hours).sum()
    }

    /// Returns the number of workdays with hours logged.
    pub fn work_days(&self) -> usize {
        self.months.iter().map(MonthState::work_days).sum()
    }

    /// Returns the number of off days.
    pub fn off_days(&self) -> usize {
        self.months.iter().map(MonthState::off_days).sum()
    }

    /// Returns the number of vacation days.
    pub fn vacation_days(&self) -> usize {
        self.months.iter().map(MonthState::vacation_days).sum()
    }

    /// Snapshots the year's totals.
    pub fn summary(&self) -> YearSummary {
        YearSummary {
            year: self.year,
            total_hours: self.total_hours(),
            work_days: self.work_days(),
            off_days: self.off_days(),
            vacation_days: self.vacation_days(),
            months: self.months.iter().map(MonthState::summary).collect(),
        }
    }
}
