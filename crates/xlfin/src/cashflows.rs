//! Cash-flow analysis: net present value and internal rates of return.
//!
//! Regular series are equally spaced and indexed from zero; irregular
//! series pair each value with a date and discount on `(d_i - d_0) / 365`
//! years.

use xlfin_core::error::{ensure_finite, FinError, FinResult};
use xlfin_core::types::Date;
use xlfin_math::solvers::Domain;

use crate::config::FinancialConfig;
use crate::solve::{require_sign_change, solve_with_derivative};

const DAYS_PER_YEAR: f64 = 365.0;

fn require_rate_above_minus_one(rate: f64, what: &str) -> FinResult<()> {
    if rate.is_finite() && rate > -1.0 {
        Ok(())
    } else {
        Err(FinError::domain(format!("{what} must be greater than -1, got {rate}")))
    }
}

fn require_non_empty(values: &[f64]) -> FinResult<()> {
    if values.is_empty() {
        Err(FinError::invalid_range("cash-flow series is empty"))
    } else {
        Ok(())
    }
}

/// Year offsets of each date from the first, validating the pairing.
fn year_offsets(values: &[f64], dates: &[Date]) -> FinResult<Vec<f64>> {
    require_non_empty(values)?;
    if values.len() != dates.len() {
        return Err(FinError::invalid_range(format!(
            "{} values but {} dates",
            values.len(),
            dates.len()
        )));
    }

    let first = dates[0];
    dates
        .iter()
        .map(|date| {
            let days = first.days_between(date);
            if days < 0 {
                Err(FinError::invalid_range(format!(
                    "date {date} precedes the first date {first}"
                )))
            } else {
                Ok(days as f64 / DAYS_PER_YEAR)
            }
        })
        .collect()
}

// =============================================================================
// Regular series
// =============================================================================

/// Σ v_i / (1+r)^i, the zero of which is the IRR.
fn discounted_sum(rate: f64, values: &[f64]) -> f64 {
    let base = 1.0 + rate;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| v / base.powi(i as i32))
        .sum()
}

fn discounted_sum_derivative(rate: f64, values: &[f64]) -> f64 {
    let base = 1.0 + rate;
    values
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, v)| -(i as f64) * v / base.powi(i as i32 + 1))
        .sum()
}

/// Net present value of equally spaced cash flows.
///
/// The first value is discounted one full period, as in the spreadsheet:
/// `Σ v_i / (1+rate)^(i+1)`.
///
/// # Errors
///
/// - `InvalidRange` if `values` is empty
/// - `DomainError` if `rate <= -1`
pub fn npv(rate: f64, values: &[f64]) -> FinResult<f64> {
    require_non_empty(values)?;
    require_rate_above_minus_one(rate, "rate")?;

    ensure_finite(discounted_sum(rate, values) / (1.0 + rate), "npv")
}

/// Internal rate of return of equally spaced cash flows.
///
/// Solves `Σ v_i / (1+r)^i = 0` on `r > -1`, starting from `guess` or the
/// configured default.
///
/// # Errors
///
/// - `NoSolution` if the series lacks a positive or a negative value, or
///   the solver does not converge
pub fn irr(values: &[f64], guess: Option<f64>, config: &FinancialConfig) -> FinResult<f64> {
    require_sign_change("irr", values)?;
    let guess = guess.unwrap_or(config.default_guess);
    require_rate_above_minus_one(guess, "guess")?;

    solve_with_derivative(
        "irr",
        |r| discounted_sum(r, values),
        |r| discounted_sum_derivative(r, values),
        guess,
        Domain::above(-1.0),
        config,
    )
}

/// Modified internal rate of return.
///
/// Positive flows are compounded to the last period at `reinvest_rate`,
/// negative flows discounted to the first at `finance_rate`, and the rate
/// linking the two over `n - 1` periods is returned.
///
/// # Errors
///
/// - `NoSolution` if the series lacks a positive or a negative value
/// - `DomainError` if either rate is `<= -1`
pub fn mirr(values: &[f64], finance_rate: f64, reinvest_rate: f64) -> FinResult<f64> {
    require_sign_change("mirr", values)?;
    require_rate_above_minus_one(finance_rate, "finance rate")?;
    require_rate_above_minus_one(reinvest_rate, "reinvest rate")?;

    let n = values.len();
    let last = (n - 1) as i32;

    let future_positive: f64 = values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(i, v)| v * (1.0 + reinvest_rate).powi(last - i as i32))
        .sum();
    let present_negative: f64 = values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v < 0.0)
        .map(|(i, v)| v / (1.0 + finance_rate).powi(i as i32))
        .sum();

    let ratio = future_positive / -present_negative;
    ensure_finite(ratio.powf(1.0 / f64::from(last)) - 1.0, "mirr")
}

// =============================================================================
// Irregular series
// =============================================================================

fn dated_sum(rate: f64, values: &[f64], years: &[f64]) -> f64 {
    let base = 1.0 + rate;
    values.iter().zip(years).map(|(v, t)| v / base.powf(*t)).sum()
}

fn dated_sum_derivative(rate: f64, values: &[f64], years: &[f64]) -> f64 {
    let base = 1.0 + rate;
    values
        .iter()
        .zip(years)
        .map(|(v, t)| -t * v / base.powf(t + 1.0))
        .sum()
}

/// Net present value of cash flows on arbitrary dates, discounted to the
/// first date.
///
/// # Errors
///
/// - `InvalidRange` if the series is empty, lengths differ, or a date
///   precedes the first date
/// - `DomainError` if `rate <= -1`
pub fn xnpv(rate: f64, values: &[f64], dates: &[Date]) -> FinResult<f64> {
    let years = year_offsets(values, dates)?;
    require_rate_above_minus_one(rate, "rate")?;

    ensure_finite(dated_sum(rate, values, &years), "xnpv")
}

/// Internal rate of return of cash flows on arbitrary dates.
///
/// # Errors
///
/// - `InvalidRange` as for [`xnpv`]
/// - `NoSolution` if the series lacks a positive or a negative value, or
///   the solver does not converge
pub fn xirr(
    values: &[f64],
    dates: &[Date],
    guess: Option<f64>,
    config: &FinancialConfig,
) -> FinResult<f64> {
    let years = year_offsets(values, dates)?;
    require_sign_change("xirr", values)?;
    let guess = guess.unwrap_or(config.default_guess);
    require_rate_above_minus_one(guess, "guess")?;

    solve_with_derivative(
        "xirr",
        |r| dated_sum(r, values, &years),
        |r| dated_sum_derivative(r, values, &years),
        guess,
        Domain::above(-1.0),
        config,
    )
}
