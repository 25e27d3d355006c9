//! Dates and day counts for deriving time to expiry.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Actual/365 and Actual/360 year fractions
//! - `time_to_expiry`: Act/365 year fraction from valuation to expiry
//!
//! Pricing functions take time to expiry as an explicit `f64` and never read
//! the clock. The helpers here are for the data layer that builds quotes.
//!
//! # Examples
//!
//! ```
//! use impvol_core::types::time::{time_to_expiry, Date};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // 182 days / 365
//! let t = time_to_expiry(valuation, expiry);
//! assert!((t - 0.4986).abs() < 0.001);
//! ```

use chrono::{Local, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as ISO 8601 (`YYYY-MM-DD`), which is also the expiry format
/// found in option-chain files.
///
/// # Examples
///
/// ```
/// use impvol_core::types::time::Date;
///
/// let date = Date::from_ymd(2025, 8, 15).unwrap();
/// let parsed: Date = "2025-08-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2025, 8, 1).unwrap();
/// assert_eq!(date - start, 14);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    /// `DateError::InvalidDate` if the components do not form a calendar date.
    ///
    /// # Examples
    ///
    /// ```
    /// use impvol_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// `DateError::ParseError` if the string is not a valid ISO date.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day count convention used to turn a date interval into years.
///
/// # Variants
/// - `ActualActual365`: Actual days / 365 (equity option convention)
/// - `ActualActual360`: Actual days / 360 (money market convention)
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ActualActual360,
}

impl DayCountConvention {
    /// Returns the conventional market name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
        }
    }

    /// Calculates the signed year fraction from `start` to `end`.
    ///
    /// Negative when `start` is after `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use impvol_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// let yf = DayCountConvention::ActualActual360.year_fraction(start, end);
    /// assert!((yf - 182.0 / 360.0).abs() < 1e-12);
    ///
    /// let back = DayCountConvention::ActualActual360.year_fraction(end, start);
    /// assert!(back < 0.0);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        let days = (end - start) as f64;
        match self {
            DayCountConvention::ActualActual365 => days / 365.0,
            DayCountConvention::ActualActual360 => days / 360.0,
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// - ACT/365: "ACT/365", "Actual/365", "Act365", "A365"
    /// - ACT/360: "ACT/360", "Actual/360", "Act360", "A360"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365" | "ACTUAL365" | "A365" => Ok(DayCountConvention::ActualActual365),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Time to expiry in years under Act/365.
///
/// Negative when the option expired before `valuation`, zero on the expiry
/// date itself. Callers treat `<= 0` as expired.
///
/// # Examples
///
/// ```
/// use impvol_core::types::time::{time_to_expiry, Date};
///
/// let valuation = Date::from_ymd(2025, 8, 1).unwrap();
/// let expired = Date::from_ymd(2025, 7, 18).unwrap();
/// assert!(time_to_expiry(valuation, expired) < 0.0);
/// ```
pub fn time_to_expiry(valuation: Date, expiry: Date) -> f64 {
    DayCountConvention::ActualActual365.year_fraction(valuation, expiry)
}
