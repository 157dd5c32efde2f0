//! Holiday-aware calendar construction.
//!
//! This module builds the classified [`CalendarYear`](crate::models::CalendarYear)
//! of a year from a [`HolidayProvider`], and keeps the calendars of every
//! supported year in [`Calendars`].

mod builder;
mod holidays;

pub use builder::{Calendars, MAX_CALENDAR_YEAR, MIN_CALENDAR_YEAR, build_calendar_year};
pub use holidays::{HolidayList, HolidayProvider, NORWAY, NorwegianHolidays, easter_sunday};
