//! Public holiday sources.
//!
//! The calendar builder only needs "the set of days off for a year and
//! country"; [`HolidayProvider`] is that seam. [`NorwegianHolidays`]
//! computes the Norwegian calendar, [`HolidayList`] serves a configured list.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::PublicHoliday;

/// Country code of the built-in Norwegian calendar.
pub const NORWAY: &str = "NO";

/// Supplies the public holidays of a year.
///
/// Implementations return only legal days off, never observances.
pub trait HolidayProvider: Send + Sync {
    /// Returns the public holiday dates of `year` in `country_code`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedCountry`] if the provider has no
    /// calendar for the country.
    fn holidays_for(&self, year: i32, country_code: &str) -> EngineResult<HashSet<NaiveDate>>;

    /// Returns `true` if `date` is a public holiday in `country_code`.
    fn is_holiday(&self, date: NaiveDate, country_code: &str) -> EngineResult<bool> {
        Ok(self.holidays_for(date.year(), country_code)?.contains(&date))
    }
}

/// Computes the date of Easter Sunday (anonymous Gregorian algorithm).
///
/// # Example
///
/// ```
/// use wage_engine::calendar::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2023), NaiveDate::from_ymd_opt(2023, 4, 9));
/// assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// The statutory public holidays of Norway.
///
/// Sundays that are also holidays (Easter Sunday, Whit Sunday) are included;
/// the weekend rule would mark them off anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct NorwegianHolidays;

impl NorwegianHolidays {
    fn dates(year: i32) -> EngineResult<Vec<NaiveDate>> {
        let unsupported = || EngineError::UnsupportedYear { year };
        let fixed = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day);
        let easter = easter_sunday(year).ok_or_else(unsupported)?;
        let from_easter = |days: i64| easter + Duration::days(days);

        [
            fixed(1, 1),              // New Year's Day
            Some(from_easter(-3)),    // Maundy Thursday
            Some(from_easter(-2)),    // Good Friday
            Some(easter),             // Easter Sunday
            Some(from_easter(1)),     // Easter Monday
            fixed(5, 1),              // Labour Day
            fixed(5, 17),             // Constitution Day
            Some(from_easter(39)),    // Ascension Day
            Some(from_easter(49)),    // Whit Sunday
            Some(from_easter(50)),    // Whit Monday
            fixed(12, 25),            // Christmas Day
            fixed(12, 26),            // St Stephen's Day
        ]
        .into_iter()
        .map(|date| date.ok_or_else(unsupported))
        .collect()
    }
}

impl HolidayProvider for NorwegianHolidays {
    fn holidays_for(&self, year: i32, country_code: &str) -> EngineResult<HashSet<NaiveDate>> {
        if !country_code.eq_ignore_ascii_case(NORWAY) {
            return Err(EngineError::UnsupportedCountry {
                code: country_code.to_string(),
            });
        }
        Ok(Self::dates(year)?.into_iter().collect())
    }
}

/// A fixed list of holidays, typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct HolidayList {
    holidays: Vec<PublicHoliday>,
}

impl HolidayList {
    /// Creates a provider over the given holidays.
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        Self { holidays }
    }
}

impl HolidayProvider for HolidayList {
    fn holidays_for(&self, year: i32, country_code: &str) -> EngineResult<HashSet<NaiveDate>> {
        let mut country = self
            .holidays
            .iter()
            .filter(|h| h.country.eq_ignore_ascii_case(country_code))
            .peekable();

        if country.peek().is_none() {
            return Err(EngineError::UnsupportedCountry {
                code: country_code.to_string(),
            });
        }

        Ok(country
            .filter(|h| h.date.year() == year && h.is_day_off())
            .map(|h| h.date)
            .collect())
    }
}
