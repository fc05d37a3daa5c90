//! Coupon schedules between settlement and maturity.
//!
//! Coupon dates are always derived from maturity by stepping back whole
//! coupon periods, so repeated stepping never drifts: the k-th date before
//! maturity is `maturity - k * 12/frequency` months, clamped to the end of
//! the target month. A maturity on the last day of its month pins every
//! coupon date to month end.

use serde::{Deserialize, Serialize};

use crate::daycounts::{days_between, DayCountBasis};
use crate::error::{FinError, FinResult};
use crate::types::{Date, Frequency};

/// Returns the quasi-coupon date `k` periods away from `anchor`.
///
/// Negative `k` steps backward. When `anchor` is a month end the result is
/// pinned to month end as well.
///
/// # Errors
///
/// Returns `FinError::InvalidDate` if the result is outside the supported
/// date range.
pub fn quasi_coupon_date(anchor: Date, frequency: Frequency, k: i32) -> FinResult<Date> {
    let months = frequency.months_per_period() as i32;
    anchor.shift_months(k * months, anchor.is_end_of_month())
}

/// The coupon dates surrounding a settlement date.
///
/// # Example
///
/// ```rust
/// use xlfin_core::{CouponSchedule, Date, Frequency};
///
/// let settlement = Date::from_ymd(2025, 3, 1).unwrap();
/// let maturity = Date::from_ymd(2030, 6, 15).unwrap();
///
/// let schedule = CouponSchedule::new(settlement, maturity, Frequency::SemiAnnual).unwrap();
/// assert_eq!(schedule.previous_coupon(), Date::from_ymd(2024, 12, 15).unwrap());
/// assert_eq!(schedule.next_coupon(), Date::from_ymd(2025, 6, 15).unwrap());
/// assert_eq!(schedule.periods_remaining(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponSchedule {
    settlement: Date,
    maturity: Date,
    frequency: Frequency,
    previous_coupon: Date,
    next_coupon: Date,
    periods_remaining: u32,
}

impl CouponSchedule {
    /// Builds the schedule for a bond settling on `settlement`.
    ///
    /// # Errors
    ///
    /// Returns `FinError::InvalidRange` if `settlement >= maturity`.
    pub fn new(settlement: Date, maturity: Date, frequency: Frequency) -> FinResult<Self> {
        if settlement >= maturity {
            return Err(FinError::invalid_range(format!(
                "settlement {settlement} must be before maturity {maturity}"
            )));
        }

        let mut next_coupon = maturity;
        let mut k: i32 = 1;
        loop {
            let candidate = quasi_coupon_date(maturity, frequency, -k)?;
            if candidate <= settlement {
                log::trace!(
                    "coupon schedule {settlement}..{maturity}: pcd={candidate} ncd={next_coupon} n={k}"
                );
                return Ok(Self {
                    settlement,
                    maturity,
                    frequency,
                    previous_coupon: candidate,
                    next_coupon,
                    periods_remaining: k as u32,
                });
            }
            next_coupon = candidate;
            k += 1;
        }
    }

    /// Builds the schedule and also checks the settlement against the issue
    /// date.
    ///
    /// # Errors
    ///
    /// Returns `FinError::InvalidRange` if settlement lies outside
    /// `[issue, maturity)`.
    pub fn with_issue(
        settlement: Date,
        maturity: Date,
        issue: Date,
        frequency: Frequency,
    ) -> FinResult<Self> {
        if settlement < issue {
            return Err(FinError::invalid_range(format!(
                "settlement {settlement} precedes issue {issue}"
            )));
        }
        Self::new(settlement, maturity, frequency)
    }

    /// Returns the settlement date.
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Returns the maturity date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the coupon frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Last coupon date on or before settlement.
    pub fn previous_coupon(&self) -> Date {
        self.previous_coupon
    }

    /// First coupon date after settlement.
    pub fn next_coupon(&self) -> Date {
        self.next_coupon
    }

    /// Number of coupons payable after settlement, maturity included.
    pub fn periods_remaining(&self) -> u32 {
        self.periods_remaining
    }

    /// Day counts of the coupon period containing settlement.
    ///
    /// For the 30/360 bases the period is always `360 / frequency` days and
    /// the days to the next coupon are what remains of it. The actual bases
    /// count calendar days on both sides.
    #[must_use]
    pub fn period(&self, basis: DayCountBasis) -> CouponPeriod {
        let accrued_days = days_between(self.previous_coupon, self.settlement, basis);

        let (days_in_period, days_to_next) = if basis.is_thirty_360() {
            let days = 360 / i64::from(self.frequency.periods_per_year());
            (days, days - accrued_days)
        } else {
            (
                self.previous_coupon.days_between(&self.next_coupon),
                self.settlement.days_between(&self.next_coupon),
            )
        };

        CouponPeriod {
            previous_coupon: self.previous_coupon,
            next_coupon: self.next_coupon,
            days_in_period,
            accrued_days,
            days_to_next,
        }
    }
}

/// Day counts for the coupon period that contains a settlement date.
///
/// `accrued_days + days_to_next == days_in_period` for every basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Coupon date on or before settlement.
    pub previous_coupon: Date,
    /// Coupon date after settlement.
    pub next_coupon: Date,
    /// Length of the period under the basis.
    pub days_in_period: i64,
    /// Days from the previous coupon to settlement.
    pub accrued_days: i64,
    /// Days from settlement to the next coupon.
    pub days_to_next: i64,
}
