//! Bond pricing functions.
//!
//! - [`price`](price::price) / [`yield_to_maturity`](price::yield_to_maturity):
//!   periodic-coupon bonds
//! - [`price_mat`](securities::price_mat) / [`yield_mat`](securities::yield_mat):
//!   securities paying all interest at maturity
//! - [`accrint`](accrued::accrint) / [`accrint_m`](accrued::accrint_m):
//!   accrued interest
//! - [`duration`](duration::duration) / [`mduration`](duration::mduration):
//!   Macaulay and modified duration

pub mod accrued;
pub mod duration;
pub mod price;
pub mod securities;

pub use accrued::{accrint, accrint_m};
pub use duration::{duration, mduration};
pub use price::{price, yield_to_maturity};
pub use securities::{price_mat, yield_mat};

use xlfin_core::daycounts::{annual_basis, DayCountBasis};
use xlfin_core::error::{FinError, FinResult};
use xlfin_core::types::{Date, Frequency};

/// Coupon-period length used to scale day counts in the pricing formulas.
///
/// Fixed-denominator bases use their year length divided by the frequency;
/// Actual/Actual uses the actual days between the surrounding coupon dates.
pub(crate) fn period_length(
    basis: DayCountBasis,
    frequency: Frequency,
    previous: Date,
    next: Date,
) -> f64 {
    match annual_basis(basis) {
        Some(year) => year / frequency.as_f64(),
        None => previous.days_between(&next) as f64,
    }
}

pub(crate) fn require_non_negative(value: f64, what: &str) -> FinResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FinError::domain(format!("{what} must be non-negative, got {value}")))
    }
}

pub(crate) fn require_positive(value: f64, what: &str) -> FinResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FinError::domain(format!("{what} must be positive, got {value}")))
    }
}
