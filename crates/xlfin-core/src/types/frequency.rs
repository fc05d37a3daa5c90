//! Coupon frequency and payment timing types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FinError, FinResult};

/// Coupon payment frequency.
///
/// Only the three frequencies accepted by the spreadsheet coupon functions
/// exist; any other count of periods per year is rejected at conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
}

impl Frequency {
    /// Converts a number of periods per year into a frequency.
    ///
    /// # Errors
    ///
    /// Returns `FinError::InvalidRange` unless `periods` is 1, 2 or 4.
    pub fn from_periods(periods: i32) -> FinResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            other => Err(FinError::invalid_range(format!(
                "frequency must be 1, 2 or 4, got {other}"
            ))),
        }
    }

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
        }
    }

    /// Returns the number of periods per year as a float, for formulas.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.periods_per_year())
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl TryFrom<i32> for Frequency {
    type Error = FinError;

    fn try_from(periods: i32) -> Result<Self, Self::Error> {
        Self::from_periods(periods)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
        };
        write!(f, "{name}")
    }
}

/// When payments fall due within each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentDue {
    /// Payment at the end of each period (spreadsheet `type = 0`).
    #[default]
    EndOfPeriod,
    /// Payment at the beginning of each period (spreadsheet `type = 1`).
    BeginningOfPeriod,
}

impl PaymentDue {
    /// Maps a spreadsheet `type` argument: zero is end of period, anything
    /// else is beginning of period.
    #[must_use]
    pub fn from_type(typ: i32) -> Self {
        if typ == 0 {
            PaymentDue::EndOfPeriod
        } else {
            PaymentDue::BeginningOfPeriod
        }
    }

    /// Returns 0.0 for end-of-period and 1.0 for beginning-of-period.
    #[must_use]
    pub fn factor(&self) -> f64 {
        match self {
            PaymentDue::EndOfPeriod => 0.0,
            PaymentDue::BeginningOfPeriod => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_periods() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
    }

    #[test]
    fn test_months_per_period() {
        assert_eq!(Frequency::Annual.months_per_period(), 12);
        assert_eq!(Frequency::SemiAnnual.months_per_period(), 6);
        assert_eq!(Frequency::Quarterly.months_per_period(), 3);
    }

    #[test]
    fn test_from_periods() {
        assert_eq!(Frequency::try_from(4).unwrap(), Frequency::Quarterly);
        for bad in [0, 3, 12, -2] {
            assert!(matches!(
                Frequency::from_periods(bad),
                Err(FinError::InvalidRange { .. })
            ));
        }
    }

    #[test]
    fn test_payment_due() {
        assert_eq!(PaymentDue::from_type(0), PaymentDue::EndOfPeriod);
        assert_eq!(PaymentDue::from_type(5), PaymentDue::BeginningOfPeriod);
        assert_eq!(PaymentDue::BeginningOfPeriod.factor(), 1.0);
        assert_eq!(PaymentDue::default().factor(), 0.0);
    }
}
