//! Public holiday model.
//!
//! This module contains the [`PublicHoliday`] type used by file-backed
//! holiday lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a listed day is a legal day off or only commemorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// A public holiday on which work is not expected.
    Public,
    /// A commemorative day that is not a day off.
    Observance,
}

/// A dated holiday within a country.
///
/// # Example
///
/// ```
/// use wage_engine::models::{HolidayKind, PublicHoliday};
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2023, 5, 17).unwrap(),
///     name: "Constitution Day".to_string(),
///     country: "NO".to_string(),
///     kind: HolidayKind::Public,
/// };
/// assert!(holiday.is_day_off());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Constitution Day").
    pub name: String,
    /// The ISO 3166 country code the holiday applies to.
    pub country: String,
    /// Whether the holiday is a day off.
    #[serde(default = "default_kind")]
    pub kind: HolidayKind,
}

fn default_kind() -> HolidayKind {
    HolidayKind::Public
}

impl PublicHoliday {
    /// Returns `true` unless the holiday is a mere observance.
    pub fn is_day_off(&self) -> bool {
        self.kind == HolidayKind::Public
    }
}
