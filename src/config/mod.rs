//! Configuration module for the Wage Engine.
//!
//! This module provides functionality for loading deployment settings from
//! YAML files and building the year data they describe.
//!
//! # Example
//!
//! ```no_run
//! use wage_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/norway").unwrap();
//! println!("Supported years: {:?}", loader.years());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DEFAULT_MAX_SESSIONS, HolidaySource, HolidaysFile, TaxConfig};
