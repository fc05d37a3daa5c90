//! Accrued interest.

use xlfin_core::daycounts::{days_between, year_fraction, DayCountBasis};
use xlfin_core::error::{ensure_finite, FinError, FinResult};
use xlfin_core::schedule::quasi_coupon_date;
use xlfin_core::types::{Date, Frequency};

use super::{period_length, require_positive};
use crate::config::FinancialConfig;

/// Index `k` of the quasi-coupon period `[q_k, q_{k+1})` that contains `date`,
/// where `q_k` is `k` periods from `anchor`.
fn period_index(anchor: Date, frequency: Frequency, date: Date) -> FinResult<i32> {
    let mut k = 0;
    while quasi_coupon_date(anchor, frequency, k)? > date {
        k -= 1;
    }
    while quasi_coupon_date(anchor, frequency, k + 1)? <= date {
        k += 1;
    }
    Ok(k)
}

/// Accrued interest of a security that pays periodic interest.
///
/// Interest accrues over quasi-coupon periods anchored on `first_interest`;
/// each period contributes its accrued days over its length. Accrual starts
/// at `issue`, except when settlement is after the first interest date and
/// `calc_method` is false, in which case it starts at the last quasi-coupon
/// date on or before settlement.
///
/// # Errors
///
/// - `InvalidRange` if `issue` is not before both `first_interest` and
///   `settlement`
/// - `DomainError` if `rate <= 0` or `par <= 0`
pub fn accrint(
    issue: Date,
    first_interest: Date,
    settlement: Date,
    rate: f64,
    par: f64,
    frequency: Frequency,
    basis: DayCountBasis,
    calc_method: bool,
) -> FinResult<f64> {
    if issue >= settlement || issue >= first_interest {
        return Err(FinError::invalid_range(format!(
            "issue {issue} must precede first interest {first_interest} and settlement {settlement}"
        )));
    }
    require_positive(rate, "rate")?;
    require_positive(par, "par")?;

    let accrual_start = if settlement > first_interest && !calc_method {
        let k = period_index(first_interest, frequency, settlement)?;
        quasi_coupon_date(first_interest, frequency, k)?
    } else {
        issue
    };

    let mut k = period_index(first_interest, frequency, accrual_start)?;
    let mut periods = 0.0;
    loop {
        let lo = quasi_coupon_date(first_interest, frequency, k)?;
        let hi = quasi_coupon_date(first_interest, frequency, k + 1)?;

        let from = lo.max(accrual_start);
        let to = hi.min(settlement);
        if to > from {
            periods += days_between(from, to, basis) as f64 / period_length(basis, frequency, lo, hi);
        }

        if hi >= settlement {
            break;
        }
        k += 1;
    }

    ensure_finite(par * rate / frequency.as_f64() * periods, "accrued interest")
}

/// Accrued interest of a security that pays interest at maturity:
/// `par * rate * yearfrac(issue, settlement)`.
///
/// # Errors
///
/// - `InvalidRange` if `issue >= settlement`
/// - `DomainError` if `rate <= 0` or `par <= 0`
pub fn accrint_m(
    issue: Date,
    settlement: Date,
    rate: f64,
    par: f64,
    basis: DayCountBasis,
    config: &FinancialConfig,
) -> FinResult<f64> {
    if issue >= settlement {
        return Err(FinError::invalid_range(format!(
            "issue {issue} must precede settlement {settlement}"
        )));
    }
    require_positive(rate, "rate")?;
    require_positive(par, "par")?;

    let years = year_fraction(issue, settlement, basis, Frequency::Annual, config.actual_actual)?;
    Ok(par * rate * years)
}
