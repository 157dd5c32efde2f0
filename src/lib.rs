//! Working-hours calendar and monthly withholding-tax engine
//!
//! This crate builds per-country calendar years with public holidays, tracks
//! the hours worked on each day with month and year totals, and answers
//! monthly withholding-tax lookups from fixed-width tax table files.

#![warn(missing_docs)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod tax;
pub mod wages;
