//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type, which reads a deployment
//! directory and builds the calendars and compiled tax tables of every
//! supported year.

use std::fs;
use std::io;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calendar::{Calendars, HolidayList, HolidayProvider, NorwegianHolidays};
use crate::error::{EngineError, EngineResult};
use crate::models::CalendarYear;
use crate::tax::{TaxTableSet, TaxYears};
use crate::wages::{MAX_DAY_HOURS, YearState};

use super::types::{AppConfig, HolidaySource, HolidaysFile};

/// Loads configuration and provides access to the prebuilt year data.
///
/// # Directory Structure
///
/// ```text
/// config/norway/
/// ├── app.yaml            # Country, supported years, defaults
/// ├── holidays.yaml       # Only read when `holidays: file`
/// └── tax-tables/
///     ├── 2023.txt        # Fixed-width tables for 2023
///     └── 2024.txt
/// ```
///
/// A supported year without a table file has a calendar but no tax tables.
///
/// # Example
///
/// ```no_run
/// use wage_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/norway")?;
/// let calendar = loader.calendar_for(2023)?;
/// let tax = loader.monthly_tax(2023, "7100", 6_000)?;
/// println!("{} days, tax {}", calendar.days().count(), tax);
/// # Ok::<(), wage_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    calendars: Calendars,
    tax_years: TaxYears,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/norway")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `app.yaml` (or `holidays.yaml` when requested) is missing or invalid
    /// - a calendar year cannot be built
    /// - a tax table file is malformed
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let app_path = path.join("app.yaml");
        let config = load_yaml::<AppConfig>(&app_path)?;
        validate(&config, &app_path)?;

        let provider: Box<dyn HolidayProvider> = match config.holidays {
            HolidaySource::Builtin => Box::new(NorwegianHolidays),
            HolidaySource::File => {
                let file = load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?;
                Box::new(HolidayList::new(file.holidays))
            }
        };
        let calendars = Calendars::build(&config.years, &config.country_code, provider.as_ref())?;

        let tax_years = Self::load_tax_tables(&path.join("tax-tables"), &config)?;

        info!(
            path = %path.display(),
            country = %config.country_code,
            years = ?config.years,
            tax_years = ?tax_years.years(),
            "Configuration loaded"
        );
        Ok(Self {
            config,
            calendars,
            tax_years,
        })
    }

    /// Loads `<year>.txt` for each configured year that has one.
    fn load_tax_tables(dir: &Path, config: &AppConfig) -> EngineResult<TaxYears> {
        let mut sets = Vec::new();

        for &year in &config.years {
            let file = dir.join(format!("{}.txt", year));
            let text = match fs::read_to_string(&file) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!(year, path = %file.display(), "No tax tables for configured year");
                    continue;
                }
                Err(e) => return Err(read_error(&file, e)),
            };
            let set = TaxTableSet::from_source(year, &text, config.tax.extrapolation_rate(year))
                .inspect_err(|err| {
                    warn!(path = %file.display(), error = %err, "Failed to compile tax tables");
                })?;
            sets.push(set);
        }

        Ok(TaxYears::new(sets))
    }

    /// Returns the deployment settings.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the supported years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.calendars.years()
    }

    /// Returns the prebuilt calendars.
    pub fn calendars(&self) -> &Calendars {
        &self.calendars
    }

    /// Returns the compiled tax tables.
    pub fn tax_years(&self) -> &TaxYears {
        &self.tax_years
    }

    /// Returns the calendar of a supported year.
    pub fn calendar_for(&self, year: i32) -> EngineResult<&CalendarYear> {
        self.calendars.calendar_for(year)
    }

    /// Returns the sorted table names of a tax year.
    pub fn table_names(&self, year: i32) -> EngineResult<Vec<&str>> {
        Ok(self.tax_years.for_year(year)?.table_names())
    }

    /// Returns the monthly tax for a salary under a year's named table.
    pub fn monthly_tax(&self, year: i32, table: &str, salary: u64) -> EngineResult<Decimal> {
        self.tax_years.monthly_tax(year, table, salary)
    }

    /// Creates fresh wage state for a supported year with the configured
    /// default workday hours.
    pub fn new_year_state(&self, year: i32) -> EngineResult<YearState> {
        let calendar = self.calendar_for(year)?;
        Ok(YearState::new(calendar, self.config.default_workday_hours))
    }
}

/// Loads and parses a YAML file.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| read_error(path, e))?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

/// Maps a failed read to `ConfigNotFound` when the file is missing and to
/// `ConfigParseError` otherwise.
fn read_error(path: &Path, error: io::Error) -> EngineError {
    let path = path.display().to_string();
    if error.kind() == io::ErrorKind::NotFound {
        EngineError::ConfigNotFound { path }
    } else {
        EngineError::ConfigParseError {
            path,
            message: error.to_string(),
        }
    }
}

fn validate(config: &AppConfig, path: &Path) -> EngineResult<()> {
    let invalid = |message: &str| EngineError::ConfigParseError {
        path: path.display().to_string(),
        message: message.to_string(),
    };

    if config.years.is_empty() {
        return Err(invalid("at least one year must be configured"));
    }
    let hours = config.default_workday_hours;
    if (hours.is_sign_negative() && !hours.is_zero()) || hours > MAX_DAY_HOURS {
        return Err(invalid("default_workday_hours must be between 0 and 24"));
    }
    if config.max_sessions == 0 {
        return Err(invalid("max_sessions must be at least 1"));
    }
    Ok(())
}
