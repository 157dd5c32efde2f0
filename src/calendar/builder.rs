//! Calendar year construction.
//!
//! This module provides [`build_calendar_year`], which classifies every date
//! of a year and groups the dates into months, and [`Calendars`], the
//! registry of prebuilt years served to callers.

use std::collections::BTreeMap;

use chrono::{Datelike, Month, NaiveDate};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarYear, DayClassification, DayEntry, MonthGroup};

use super::holidays::HolidayProvider;

/// The earliest year the builder accepts.
pub const MIN_CALENDAR_YEAR: i32 = 1;

/// The latest year the builder accepts.
pub const MAX_CALENDAR_YEAR: i32 = 9999;

/// Builds the classified calendar of a year.
///
/// Every date from January 1 to December 31 is visited in order. A date is an
/// off day if it falls on a Saturday or Sunday or is in the provider's holiday
/// set for the year and country; otherwise it is a workday.
///
/// # Arguments
///
/// * `year` - The year to build
/// * `country_code` - The country whose holidays apply
/// * `provider` - The holiday source
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedYear`] for a year outside
/// [`MIN_CALENDAR_YEAR`]..=[`MAX_CALENDAR_YEAR`], and propagates provider
/// errors such as [`EngineError::UnsupportedCountry`].
///
/// # Example
///
/// ```
/// use wage_engine::calendar::{build_calendar_year, NorwegianHolidays};
/// use chrono::Month;
///
/// let calendar = build_calendar_year(2024, "NO", &NorwegianHolidays)?;
/// assert_eq!(calendar.months().len(), 12);
/// assert_eq!(calendar.month(Month::February).days().len(), 29);
/// assert_eq!(calendar.days().count(), 366);
/// # Ok::<(), wage_engine::error::EngineError>(())
/// ```
pub fn build_calendar_year(
    year: i32,
    country_code: &str,
    provider: &dyn HolidayProvider,
) -> EngineResult<CalendarYear> {
    if !(MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&year) {
        return Err(EngineError::UnsupportedYear { year });
    }
    let first_day =
        NaiveDate::from_ymd_opt(year, 1, 1).ok_or(EngineError::UnsupportedYear { year })?;
    let holidays = provider.holidays_for(year, country_code)?;

    let mut months = Vec::with_capacity(12);
    let mut month = Month::January;
    for _ in 0..12 {
        months.push(MonthGroup::new(year, month));
        month = month.succ();
    }

    for date in first_day.iter_days().take_while(|d| d.year() == year) {
        let entry = DayEntry::new(date, holidays.contains(&date));
        months[date.month0() as usize].push(entry);
    }

    let calendar = CalendarYear::new(year, country_code.to_string(), months);
    debug!(
        year,
        country = country_code,
        workdays = calendar
            .days()
            .filter(|d| d.classification == DayClassification::Workday)
            .count(),
        "Built calendar year"
    );
    Ok(calendar)
}

/// The calendars of every supported year, built once.
///
/// # Example
///
/// ```
/// use wage_engine::calendar::{Calendars, NorwegianHolidays};
///
/// let calendars = Calendars::build(&[2023, 2024], "NO", &NorwegianHolidays)?;
/// assert_eq!(calendars.years(), vec![2023, 2024]);
/// assert!(calendars.calendar_for(2022).is_err());
/// # Ok::<(), wage_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Calendars {
    years: BTreeMap<i32, CalendarYear>,
}

impl Calendars {
    /// Builds the calendar of each listed year.
    ///
    /// # Errors
    ///
    /// Fails on the first year that cannot be built.
    pub fn build(
        years: &[i32],
        country_code: &str,
        provider: &dyn HolidayProvider,
    ) -> EngineResult<Self> {
        let mut calendars = BTreeMap::new();
        for &year in years {
            calendars.insert(year, build_calendar_year(year, country_code, provider)?);
        }

        info!(
            country = country_code,
            years = calendars.len(),
            "Calendars ready"
        );
        Ok(Self { years: calendars })
    }

    /// Returns the supported years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    /// Returns the calendar of a supported year.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownYear`] if the year is not supported.
    pub fn calendar_for(&self, year: i32) -> EngineResult<&CalendarYear> {
        self.years
            .get(&year)
            .ok_or(EngineError::UnknownYear { year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::NorwegianHolidays;
    use chrono::Weekday;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// A provider with no holidays, so only weekends are off.
    struct WeekendsOnly;

    impl HolidayProvider for WeekendsOnly {
        fn holidays_for(&self, _year: i32, _country: &str) -> EngineResult<HashSet<NaiveDate>> {
            Ok(HashSet::new())
        }
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn count(calendar: &CalendarYear, classification: DayClassification) -> usize {
        calendar
            .days()
            .filter(|d| d.classification == classification)
            .count()
    }

    // ==========================================================================
    // CB-001: Common year has 365 days and twelve ordered months
    // ==========================================================================
    #[test]
    fn test_cb_001_common_year_has_365_days() {
        let calendar = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        assert_eq!(calendar.year(), 2023);
        assert_eq!(calendar.days().count(), 365);

        let names: Vec<&str> = calendar.months().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December"
            ]
        );
        assert_eq!(calendar.month(Month::February).days().len(), 28);
    }

    // ==========================================================================
    // CB-002: Leap year has 366 days
    // ==========================================================================
    #[test]
    fn test_cb_002_leap_year_has_366_days() {
        let calendar = build_calendar_year(2024, "NO", &NorwegianHolidays).unwrap();
        assert_eq!(calendar.days().count(), 366);
        let february = calendar.month(Month::February);
        assert_eq!(february.days().last().unwrap().date, make_date("2024-02-29"));
    }

    // ==========================================================================
    // CB-003: Norwegian 2023 workday and off-day counts
    // ==========================================================================
    #[test]
    fn test_cb_003_norwegian_2023_classification_counts() {
        // 260 weekdays minus 9 weekday holidays
        let calendar = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        assert_eq!(count(&calendar, DayClassification::Workday), 251);
        assert_eq!(count(&calendar, DayClassification::OffDay), 114);
    }

    #[test]
    fn test_weekday_holiday_is_off_day() {
        let calendar = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        let constitution_day = calendar.day(make_date("2023-05-17")).unwrap();
        assert_eq!(constitution_day.day_of_week, Weekday::Wed);
        assert!(constitution_day.holiday);
        assert_eq!(constitution_day.classification, DayClassification::OffDay);

        let ordinary = calendar.day(make_date("2023-05-16")).unwrap();
        assert_eq!(ordinary.classification, DayClassification::Workday);
    }

    #[test]
    fn test_weekend_off_days_fall_on_saturday_or_sunday() {
        let calendar = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        for day in calendar
            .days()
            .filter(|d| d.classification == DayClassification::OffDay && !d.holiday)
        {
            assert!(
                matches!(day.day_of_week, Weekday::Sat | Weekday::Sun),
                "{} is an off day but not a weekend",
                day.date
            );
        }
    }

    #[test]
    fn test_day_lookup_outside_year() {
        let calendar = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        assert!(calendar.day(make_date("2024-01-01")).is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let first = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        let second = build_calendar_year(2023, "NO", &NorwegianHolidays).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsupported_years_are_rejected() {
        for year in [0, -1, 10_000] {
            match build_calendar_year(year, "NO", &WeekendsOnly) {
                Err(EngineError::UnsupportedYear { year: y }) => assert_eq!(y, year),
                other => panic!("Expected UnsupportedYear error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_provider_errors_propagate() {
        assert!(matches!(
            build_calendar_year(2023, "XX", &NorwegianHolidays),
            Err(EngineError::UnsupportedCountry { .. })
        ));
    }

    #[test]
    fn test_calendars_unknown_year() {
        let calendars = Calendars::build(&[2023], "NO", &NorwegianHolidays).unwrap();
        assert_eq!(calendars.calendar_for(2023).unwrap().country_code(), "NO");
        assert_eq!(calendars.calendar_for(2023).unwrap().year(), 2023);
        assert!(matches!(
            calendars.calendar_for(2024),
            Err(EngineError::UnknownYear { year: 2024 })
        ));
    }

    #[test]
    fn test_calendar_for_returns_same_structure_twice() {
        let calendars = Calendars::build(&[2024], "NO", &NorwegianHolidays).unwrap();
        assert_eq!(
            calendars.calendar_for(2024).unwrap(),
            calendars.calendar_for(2024).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_year_is_complete_and_ordered(year in MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR) {
            let calendar = build_calendar_year(year, "NO", &WeekendsOnly).unwrap();
            let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
            let days: Vec<&DayEntry> = calendar.days().collect();

            prop_assert_eq!(days.len(), if leap { 366 } else { 365 });
            prop_assert_eq!(days[0].date, NaiveDate::from_ymd_opt(year, 1, 1).unwrap());
            for pair in days.windows(2) {
                prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
            for (index, month) in calendar.months().iter().enumerate() {
                prop_assert_eq!(month.month().number_from_month() as usize, index + 1);
                prop_assert!(month.days().iter().all(|d| d.date.month0() as usize == index));
            }
        }

        #[test]
        fn prop_off_days_without_holidays_are_weekends(year in 1900i32..2100) {
            let calendar = build_calendar_year(year, "NO", &WeekendsOnly).unwrap();
            for day in calendar.days() {
                let weekend = matches!(day.day_of_week, Weekday::Sat | Weekday::Sun);
                prop_assert_eq!(day.classification == DayClassification::OffDay, weekend);
            }
        }
    }
}
