//! Day count bases for the spreadsheet financial functions.
//!
//! A basis decides how a span between two dates is counted in days and how
//! that count turns into a year fraction.
//!
//! # Supported Bases
//!
//! | Code | Basis | Days | Year |
//! |------|-------|------|------|
//! | 0 | [`DayCountBasis::UsPsa30_360`] | 30/360 with US February rules | 360 |
//! | 1 | [`DayCountBasis::ActualActual`] | actual | coupon period or calendar year |
//! | 2 | [`DayCountBasis::Actual360`] | actual | 360 |
//! | 3 | [`DayCountBasis::Actual365`] | actual | 365 |
//! | 4 | [`DayCountBasis::European30_360`] | 30E/360 | 360 |
//!
//! # Usage
//!
//! ```rust
//! use xlfin_core::daycounts::{days_between, year_fraction, ActualActualConvention, DayCountBasis};
//! use xlfin_core::types::{Date, Frequency};
//!
//! let start = Date::from_ymd(2025, 1, 31).unwrap();
//! let end = Date::from_ymd(2025, 3, 31).unwrap();
//!
//! assert_eq!(days_between(start, end, DayCountBasis::UsPsa30_360), 60);
//!
//! let yf = year_fraction(
//!     start,
//!     end,
//!     DayCountBasis::Actual360,
//!     Frequency::SemiAnnual,
//!     ActualActualConvention::default(),
//! )
//! .unwrap();
//! assert!((yf - 59.0 / 360.0).abs() < 1e-12);
//! ```

mod actual;
mod thirty360;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FinError, FinResult};
use crate::types::{Date, Frequency};

/// Day count basis, numbered as in the spreadsheet `basis` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountBasis {
    /// 30/360 US (NASD/PSA) - code 0
    #[default]
    UsPsa30_360,

    /// Actual/Actual - code 1
    ActualActual,

    /// Actual/360 - code 2
    Actual360,

    /// Actual/365 - code 3
    Actual365,

    /// 30E/360 European - code 4
    European30_360,
}

impl DayCountBasis {
    /// Converts a spreadsheet basis code.
    ///
    /// # Errors
    ///
    /// Returns `FinError::UnsupportedBasis` for codes outside 0..=4.
    pub fn from_code(code: i32) -> FinResult<Self> {
        match code {
            0 => Ok(DayCountBasis::UsPsa30_360),
            1 => Ok(DayCountBasis::ActualActual),
            2 => Ok(DayCountBasis::Actual360),
            3 => Ok(DayCountBasis::Actual365),
            4 => Ok(DayCountBasis::European30_360),
            other => Err(FinError::unsupported_basis(other)),
        }
    }

    /// Returns the spreadsheet basis code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            DayCountBasis::UsPsa30_360 => 0,
            DayCountBasis::ActualActual => 1,
            DayCountBasis::Actual360 => 2,
            DayCountBasis::Actual365 => 3,
            DayCountBasis::European30_360 => 4,
        }
    }

    /// Returns the conventional market name of the basis.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountBasis::UsPsa30_360 => "30/360 US",
            DayCountBasis::ActualActual => "ACT/ACT",
            DayCountBasis::Actual360 => "ACT/360",
            DayCountBasis::Actual365 => "ACT/365",
            DayCountBasis::European30_360 => "30E/360",
        }
    }

    /// Returns all bases in code order.
    #[must_use]
    pub fn all() -> &'static [DayCountBasis] {
        &[
            DayCountBasis::UsPsa30_360,
            DayCountBasis::ActualActual,
            DayCountBasis::Actual360,
            DayCountBasis::Actual365,
            DayCountBasis::European30_360,
        ]
    }

    /// True for the two 30/360 bases.
    #[must_use]
    pub const fn is_thirty_360(&self) -> bool {
        matches!(
            self,
            DayCountBasis::UsPsa30_360 | DayCountBasis::European30_360
        )
    }
}

impl TryFrom<i32> for DayCountBasis {
    type Error = FinError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountBasis {
    type Err = DayCountParseError;

    /// Parses a basis from a market name, an enum-style name or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "0" | "30/360" | "30/360 US" | "30U/360" | "BOND" | "NASD" | "PSA"
            | "USPSA30_360" => Ok(DayCountBasis::UsPsa30_360),

            "1" | "ACT/ACT" | "ACTUAL/ACTUAL" | "ACTACT" | "ACTUALACTUAL" => {
                Ok(DayCountBasis::ActualActual)
            }

            "2" | "ACT/360" | "ACTUAL/360" | "ACT360" | "ACTUAL360" => {
                Ok(DayCountBasis::Actual360)
            }

            "3" | "ACT/365" | "ACTUAL/365" | "ACT/365F" | "ACT365" | "ACTUAL365" => {
                Ok(DayCountBasis::Actual365)
            }

            "4" | "30E/360" | "30/360 EU" | "EUROBOND" | "EUROPEAN30_360" => {
                Ok(DayCountBasis::European30_360)
            }

            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error type for parsing day count bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day count basis: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

/// How the Actual/Actual basis turns a day count into a year fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActualActualConvention {
    /// Divide by the actual length of each enclosing coupon period (ICMA).
    #[default]
    CouponPeriod,
    /// Divide by the length of the calendar year (365 or 366, averaged over
    /// multi-year spans).
    ActualYear,
}

// =============================================================================
// Dispatch
// =============================================================================

/// Counts the days from `start` to `end` under `basis`.
///
/// The result is negative when `end` precedes `start`.
#[must_use]
pub fn days_between(start: Date, end: Date, basis: DayCountBasis) -> i64 {
    match basis {
        DayCountBasis::UsPsa30_360 => thirty360::us_psa_days(start, end),
        DayCountBasis::European30_360 => thirty360::european_days(start, end),
        DayCountBasis::ActualActual | DayCountBasis::Actual360 | DayCountBasis::Actual365 => {
            start.days_between(&end)
        }
    }
}

/// Returns the fixed number of days per year for `basis`, or `None` for
/// Actual/Actual whose denominator depends on the dates.
#[must_use]
pub fn annual_basis(basis: DayCountBasis) -> Option<f64> {
    match basis {
        DayCountBasis::UsPsa30_360 | DayCountBasis::European30_360 | DayCountBasis::Actual360 => {
            Some(360.0)
        }
        DayCountBasis::Actual365 => Some(365.0),
        DayCountBasis::ActualActual => None,
    }
}

/// Computes the year fraction between two dates.
///
/// # Arguments
///
/// * `start`, `end` - The span; the order does not matter
/// * `basis` - Day count basis
/// * `frequency` - Coupon frequency used to build Actual/Actual periods
/// * `convention` - Actual/Actual denominator rule
///
/// # Returns
///
/// A non-negative year fraction, zero for equal dates.
///
/// # Errors
///
/// Returns `FinError::InvalidDate` if Actual/Actual period generation runs
/// outside the supported date range.
pub fn year_fraction(
    start: Date,
    end: Date,
    basis: DayCountBasis,
    frequency: Frequency,
    convention: ActualActualConvention,
) -> FinResult<f64> {
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    if start == end {
        return Ok(0.0);
    }

    match annual_basis(basis) {
        Some(year) => Ok(days_between(start, end, basis) as f64 / year),
        None => match convention {
            ActualActualConvention::CouponPeriod => {
                actual::coupon_period_fraction(start, end, frequency)
            }
            ActualActualConvention::ActualYear => Ok(actual::actual_year_fraction(start, end)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn yf(start: Date, end: Date, basis: DayCountBasis) -> f64 {
        year_fraction(
            start,
            end,
            basis,
            Frequency::SemiAnnual,
            ActualActualConvention::CouponPeriod,
        )
        .unwrap()
    }

    #[test]
    fn test_codes_round_trip() {
        for basis in DayCountBasis::all() {
            assert_eq!(DayCountBasis::from_code(basis.code()).unwrap(), *basis);
        }
        assert_eq!(DayCountBasis::default(), DayCountBasis::UsPsa30_360);
    }

    #[test]
    fn test_unsupported_code() {
        assert_eq!(
            DayCountBasis::try_from(5),
            Err(FinError::UnsupportedBasis { code: 5 })
        );
        assert!(DayCountBasis::from_code(-1).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("30/360".parse::<DayCountBasis>().unwrap(), DayCountBasis::UsPsa30_360);
        assert_eq!("act/act".parse::<DayCountBasis>().unwrap(), DayCountBasis::ActualActual);
        assert_eq!("ACTUAL/360".parse::<DayCountBasis>().unwrap(), DayCountBasis::Actual360);
        assert_eq!("3".parse::<DayCountBasis>().unwrap(), DayCountBasis::Actual365);
        assert_eq!(" 30E/360 ".parse::<DayCountBasis>().unwrap(), DayCountBasis::European30_360);
        assert!("ACT/ACT ISDA".parse::<DayCountBasis>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for basis in DayCountBasis::all() {
            assert_eq!(basis.to_string().parse::<DayCountBasis>().unwrap(), *basis);
        }
    }

    #[test]
    fn test_days_between_dispatch() {
        let start = d(2025, 1, 31);
        let end = d(2025, 3, 31);
        assert_eq!(days_between(start, end, DayCountBasis::UsPsa30_360), 60);
        assert_eq!(days_between(start, end, DayCountBasis::European30_360), 60);
        assert_eq!(days_between(start, end, DayCountBasis::ActualActual), 59);
        assert_eq!(days_between(start, end, DayCountBasis::Actual360), 59);
        assert_eq!(days_between(start, end, DayCountBasis::Actual365), 59);
    }

    #[test]
    fn test_fixed_denominators() {
        let start = d(2025, 1, 1);
        let end = d(2026, 1, 1);
        assert_relative_eq!(yf(start, end, DayCountBasis::UsPsa30_360), 1.0);
        assert_relative_eq!(yf(start, end, DayCountBasis::Actual360), 365.0 / 360.0);
        assert_relative_eq!(yf(start, end, DayCountBasis::Actual365), 1.0);
    }

    #[test]
    fn test_year_fraction_symmetric() {
        let a = d(2024, 3, 15);
        let b = d(2026, 11, 2);
        for basis in DayCountBasis::all() {
            assert_relative_eq!(yf(a, b, *basis), yf(b, a, *basis));
        }
    }

    #[test]
    fn test_year_fraction_equal_dates() {
        let a = d(2024, 2, 29);
        for basis in DayCountBasis::all() {
            assert_eq!(yf(a, a, *basis), 0.0);
        }
    }

    #[test]
    fn test_actual_actual_conventions_differ() {
        let start = d(2024, 1, 1);
        let end = d(2024, 4, 1);
        let coupon = yf(start, end, DayCountBasis::ActualActual);
        let calendar = year_fraction(
            start,
            end,
            DayCountBasis::ActualActual,
            Frequency::SemiAnnual,
            ActualActualConvention::ActualYear,
        )
        .unwrap();

        assert_relative_eq!(calendar, 91.0 / 366.0, epsilon = 1e-12);
        // Quasi-coupon period 2023-10-01 -> 2024-04-01 has 183 days
        assert_relative_eq!(coupon, 91.0 / (2.0 * 183.0), epsilon = 1e-12);
    }

    #[test]
    fn test_annual_basis() {
        assert_eq!(annual_basis(DayCountBasis::UsPsa30_360), Some(360.0));
        assert_eq!(annual_basis(DayCountBasis::Actual365), Some(365.0));
        assert_eq!(annual_basis(DayCountBasis::ActualActual), None);
    }
}
