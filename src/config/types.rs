//! Configuration types for the wage engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::PublicHoliday;
use crate::tax::DEFAULT_EXTRAPOLATION_RATE;
use crate::wages::DEFAULT_WORKDAY_HOURS;

/// Where public holidays come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidaySource {
    /// The computed calendar built into the engine.
    #[default]
    Builtin,
    /// The list in `holidays.yaml` next to `app.yaml`.
    File,
}

/// Tax table settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// The marginal rate above the highest bracket, unless overridden.
    #[serde(default = "default_extrapolation_rate")]
    pub default_extrapolation_rate: Decimal,
    /// Per-year overrides of the extrapolation rate.
    #[serde(default)]
    pub extrapolation_rates: BTreeMap<i32, Decimal>,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            default_extrapolation_rate: DEFAULT_EXTRAPOLATION_RATE,
            extrapolation_rates: BTreeMap::new(),
        }
    }
}

impl TaxConfig {
    /// Returns the extrapolation rate in effect for a year.
    pub fn extrapolation_rate(&self, year: i32) -> Decimal {
        self.extrapolation_rates
            .get(&year)
            .copied()
            .unwrap_or(self.default_extrapolation_rate)
    }
}

fn default_extrapolation_rate() -> Decimal {
    DEFAULT_EXTRAPOLATION_RATE
}

fn default_workday_hours() -> Decimal {
    DEFAULT_WORKDAY_HOURS
}

/// Default cap on concurrently open wage sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

/// Deployment settings from `app.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// The country whose holidays apply (e.g. "NO").
    pub country_code: String,
    /// The supported calendar and tax years.
    pub years: Vec<i32>,
    /// Hours logged by default on each workday.
    #[serde(default = "default_workday_hours")]
    pub default_workday_hours: Decimal,
    /// The holiday source.
    #[serde(default)]
    pub holidays: HolidaySource,
    /// Most wage sessions the API keeps open at once.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Tax table settings.
    #[serde(default)]
    pub tax: TaxConfig,
}

/// Holiday list file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// The listed holidays.
    pub holidays: Vec<PublicHoliday>,
}
