//! Per-day wage state.
//!
//! A [`DayState`] pairs an immutable [`DayEntry`] with the hours logged on it
//! and derives the day's [`DayType`] from both.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayClassification, DayEntry};

/// Default hours logged on a workday (7.5).
pub const DEFAULT_WORKDAY_HOURS: Decimal = Decimal::from_parts(75, 0, 0, false, 1);

/// Most hours that can be logged on a single day.
pub const MAX_DAY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// The derived type of a day in the wage model.
///
/// # Example
///
/// ```
/// use wage_engine::wages::DayType;
///
/// assert_eq!(DayType::Vacation.to_string(), "Vacation");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// A workday with hours logged.
    Workday,
    /// A weekend day or public holiday, whatever hours are logged.
    OffDay,
    /// A workday with no hours logged.
    Vacation,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Workday => write!(f, "Workday"),
            DayType::OffDay => write!(f, "Off day"),
            DayType::Vacation => write!(f, "Vacation"),
        }
    }
}

/// A calendar day together with the hours logged on it.
///
/// # Example
///
/// ```
/// use wage_engine::models::DayEntry;
/// use wage_engine::wages::{DayState, DayType, DEFAULT_WORKDAY_HOURS};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // 2023-03-01 is a Wednesday
/// let entry = DayEntry::new(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), false);
/// let mut day = DayState::new(entry, DEFAULT_WORKDAY_HOURS);
/// assert_eq!(day.day_type(), DayType::Workday);
///
/// day.set_hours(Decimal::ZERO).unwrap();
/// assert_eq!(day.day_type(), DayType::Vacation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayState {
    entry: DayEntry,
    hours: Decimal,
}

impl DayState {
    /// Wraps a calendar entry, logging `default_workday_hours` on workdays and
    /// zero hours on off days.
    pub fn new(entry: DayEntry, default_workday_hours: Decimal) -> Self {
        let hours = match entry.classification {
            DayClassification::Workday => default_workday_hours,
            DayClassification::OffDay => Decimal::ZERO,
        };
        Self { entry, hours }
    }

    /// Returns the underlying calendar entry.
    pub fn entry(&self) -> &DayEntry {
        &self.entry
    }

    /// Returns the date.
    pub fn date(&self) -> NaiveDate {
        self.entry.date
    }

    /// Returns the logged hours.
    pub fn hours(&self) -> Decimal {
        self.hours
    }

    /// Derives the day type from the base classification and logged hours.
    ///
    /// Off days stay off days whatever is logged. Workdays with zero hours
    /// count as vacation.
    pub fn day_type(&self) -> DayType {
        match self.entry.classification {
            DayClassification::OffDay => DayType::OffDay,
            DayClassification::Workday if self.hours.is_zero() => DayType::Vacation,
            DayClassification::Workday => DayType::Workday,
        }
    }

    /// Logs hours on the day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHours`] for a negative value or one above
    /// [`MAX_DAY_HOURS`], leaving the previous hours in place.
    pub fn set_hours(&mut self, hours: Decimal) -> EngineResult<()> {
        let negative = hours.is_sign_negative() && !hours.is_zero();
        if negative || hours > MAX_DAY_HOURS {
            return Err(EngineError::InvalidHours {
                date: self.entry.date,
                hours,
            });
        }
        self.hours = hours;
        Ok(())
    }
}
