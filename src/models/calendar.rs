//! Calendar structure models.
//!
//! This module contains the static, immutable representation of a year:
//! [`DayEntry`] for a single classified date, [`MonthGroup`] for the ordered
//! days of one month, and [`CalendarYear`] for all twelve months.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The calendar-determined classification of a day.
///
/// # Example
///
/// ```
/// use wage_engine::models::DayClassification;
///
/// assert_eq!(DayClassification::OffDay.to_string(), "Off day");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClassification {
    /// An ordinary working day.
    Workday,
    /// A weekend day or public holiday.
    OffDay,
}

impl std::fmt::Display for DayClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayClassification::Workday => write!(f, "Workday"),
            DayClassification::OffDay => write!(f, "Off day"),
        }
    }
}

/// A single date of a calendar year with its base classification.
///
/// # Example
///
/// ```
/// use wage_engine::models::{DayClassification, DayEntry};
/// use chrono::{NaiveDate, Weekday};
///
/// // 2023-05-17 is a Wednesday and Norwegian Constitution Day
/// let entry = DayEntry::new(NaiveDate::from_ymd_opt(2023, 5, 17).unwrap(), true);
/// assert_eq!(entry.day_of_week, Weekday::Wed);
/// assert_eq!(entry.classification, DayClassification::OffDay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// The date.
    pub date: NaiveDate,
    /// The day of the week.
    pub day_of_week: Weekday,
    /// The ISO-8601 week number.
    pub iso_week: u32,
    /// Whether the date is a public holiday.
    pub holiday: bool,
    /// The base classification derived from weekday and holiday status.
    pub classification: DayClassification,
}

impl DayEntry {
    /// Creates an entry for a date, classifying it from its weekday and
    /// holiday status.
    pub fn new(date: NaiveDate, holiday: bool) -> Self {
        let day_of_week = date.weekday();
        let weekend = matches!(day_of_week, Weekday::Sat | Weekday::Sun);
        let classification = if weekend || holiday {
            DayClassification::OffDay
        } else {
            DayClassification::Workday
        };

        Self {
            date,
            day_of_week,
            iso_week: date.iso_week().week(),
            holiday,
            classification,
        }
    }

    /// Returns the ISO day-of-week number (Monday = 1, Sunday = 7).
    pub fn iso_day_of_week(&self) -> u32 {
        self.day_of_week.number_from_monday()
    }

    /// Returns `true` if the day falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.day_of_week, Weekday::Sat | Weekday::Sun)
    }
}

/// The ordered days of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    year: i32,
    month: Month,
    name: &'static str,
    days: Vec<DayEntry>,
}

impl MonthGroup {
    pub(crate) fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month,
            name: month.name(),
            days: Vec::with_capacity(31),
        }
    }

    pub(crate) fn push(&mut self, entry: DayEntry) {
        self.days.push(entry);
    }

    /// Returns the year this month belongs to.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month.
    pub fn month(&self) -> Month {
        self.month
    }

    /// Returns the canonical English month name (e.g. "January").
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the days of the month in ascending date order.
    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }
}

/// A full calendar year partitioned into twelve months.
///
/// Built once by [`crate::calendar::build_calendar_year`] and only exposed
/// through read-only accessors afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarYear {
    year: i32,
    country_code: String,
    months: Vec<MonthGroup>,
}

impl CalendarYear {
    pub(crate) fn new(year: i32, country_code: String, months: Vec<MonthGroup>) -> Self {
        debug_assert_eq!(months.len(), 12);
        Self {
            year,
            country_code,
            months,
        }
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the country whose holidays were applied.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Returns the twelve months in calendar order.
    pub fn months(&self) -> &[MonthGroup] {
        &self.months
    }

    /// Returns the group for a single month.
    pub fn month(&self, month: Month) -> &MonthGroup {
        &self.months[month.number_from_month() as usize - 1]
    }

    /// Iterates over every day of the year in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayEntry> {
        self.months.iter().flat_map(|m| m.days.iter())
    }

    /// Looks up the entry for a date, if it belongs to this year.
    pub fn day(&self, date: NaiveDate) -> Option<&DayEntry> {
        if date.year() != self.year {
            return None;
        }
        self.months[date.month0() as usize]
            .days
            .get(date.day0() as usize)
    }
}
