//! Loan and annuity functions.
//!
//! All of them rest on one balance equation,
//!
//! ```text
//! pv·(1+r)^n + pmt·(1 + r·type)·((1+r)^n - 1)/r + fv = 0
//! ```
//!
//! with the `r = 0` limit `pv + pmt·n + fv = 0`. Signs follow the cash
//! direction: money paid out is negative.

use xlfin_core::error::{ensure_finite, FinError, FinResult};
use xlfin_core::types::PaymentDue;
use xlfin_math::solvers::Domain;

use crate::config::FinancialConfig;
use crate::solve::solve_with_derivative;

/// Returns `((1+rate)^nper, (1+rate)^nper - 1)` through `ln_1p`/`exp_m1`
/// so small rates keep their precision.
fn pow1p(rate: f64, nper: f64) -> FinResult<(f64, f64)> {
    let ln1p = rate.ln_1p();
    if !ln1p.is_finite() {
        return Err(FinError::domain(format!("rate {rate} must be greater than -1")));
    }
    let growth_minus_one = (nper * ln1p).exp_m1();
    let growth = growth_minus_one + 1.0;
    if growth.is_finite() && growth_minus_one.is_finite() {
        Ok((growth, growth_minus_one))
    } else {
        Err(FinError::domain(format!(
            "(1 + {rate})^{nper} overflows"
        )))
    }
}

/// Compounding terms of the balance equation at a non-zero rate.
struct Annuity {
    growth: f64,
    payment_factor: f64,
}

impl Annuity {
    fn new(rate: f64, nper: f64, due: PaymentDue) -> FinResult<Self> {
        let (growth, growth_minus_one) = pow1p(rate, nper)?;
        Ok(Self {
            growth,
            payment_factor: (1.0 + rate * due.factor()) * growth_minus_one / rate,
        })
    }
}

// =============================================================================
// Closed forms
// =============================================================================

/// Future value of a loan or investment.
pub fn fv(rate: f64, nper: f64, pmt: f64, pv: f64, due: PaymentDue) -> FinResult<f64> {
    if rate == 0.0 {
        return Ok(-(pv + pmt * nper));
    }
    let a = Annuity::new(rate, nper, due)?;
    ensure_finite(-(pv * a.growth + pmt * a.payment_factor), "fv")
}

/// Present value of a loan or investment.
pub fn pv(rate: f64, nper: f64, pmt: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
    if rate == 0.0 {
        return Ok(-fv - pmt * nper);
    }
    let a = Annuity::new(rate, nper, due)?;
    if a.growth == 0.0 {
        return Err(FinError::domain("discount factor is zero"));
    }
    ensure_finite(-(fv + pmt * a.payment_factor) / a.growth, "pv")
}

/// Constant periodic payment.
///
/// # Errors
///
/// `DomainError` when `nper` is zero or the rate makes the annuity factor
/// vanish.
pub fn pmt(rate: f64, nper: f64, pv: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
    if nper == 0.0 {
        return Err(FinError::domain("number of periods is zero"));
    }
    if rate == 0.0 {
        return Ok(-(pv + fv) / nper);
    }
    let a = Annuity::new(rate, nper, due)?;
    if a.payment_factor == 0.0 {
        return Err(FinError::domain("annuity factor is zero"));
    }
    ensure_finite(-(pv * a.growth + fv) / a.payment_factor, "pmt")
}

/// Interest part of the payment in period `per` (1-based).
///
/// # Errors
///
/// `InvalidRange` unless `1 <= per <= nper`.
pub fn ipmt(rate: f64, per: f64, nper: f64, pv: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
    if per < 1.0 || per > nper {
        return Err(FinError::invalid_range(format!(
            "period {per} outside 1..={nper}"
        )));
    }
    if rate == 0.0 {
        return Ok(0.0);
    }

    let payment = pmt(rate, nper, pv, fv, due)?;
    match due {
        // Nothing has accrued when the first payment falls on day one.
        PaymentDue::BeginningOfPeriod if per == 1.0 => Ok(0.0),
        PaymentDue::BeginningOfPeriod => {
            let balance = self::fv(rate, per - 1.0, payment, pv, due)?;
            Ok(balance * rate / (1.0 + rate))
        }
        PaymentDue::EndOfPeriod => {
            let balance = self::fv(rate, per - 1.0, payment, pv, due)?;
            Ok(balance * rate)
        }
    }
}

/// Principal part of the payment in period `per` (1-based).
pub fn ppmt(rate: f64, per: f64, nper: f64, pv: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
    let interest = ipmt(rate, per, nper, pv, fv, due)?;
    Ok(pmt(rate, nper, pv, fv, due)? - interest)
}

/// Number of periods needed to move `pv` to `fv` with payment `pmt`.
///
/// # Errors
///
/// `DomainError` when no real period count satisfies the balance equation.
pub fn nper(rate: f64, pmt: f64, pv: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
    if rate == 0.0 {
        if pmt == 0.0 {
            return if pv + fv == 0.0 {
                Ok(0.0)
            } else {
                Err(FinError::domain("zero rate and zero payment cannot reach fv"))
            };
        }
        return Ok(-(pv + fv) / pmt);
    }

    let ln1p = rate.ln_1p();
    if !ln1p.is_finite() {
        return Err(FinError::domain(format!("rate {rate} must be greater than -1")));
    }

    let growth = if pmt == 0.0 {
        if pv == 0.0 {
            return Err(FinError::domain("pv and pmt are both zero"));
        }
        -fv / pv
    } else {
        let a = pmt * (1.0 + rate * due.factor()) / rate;
        if pv + a == 0.0 {
            return Err(FinError::domain("payment exactly offsets interest"));
        }
        (a - fv) / (pv + a)
    };

    if growth <= 0.0 {
        return Err(FinError::domain("no real number of periods reaches fv"));
    }
    ensure_finite(growth.ln() / ln1p, "nper")
}

/// Interest paid in period `per` (0-based) of a straight-line principal
/// repayment schedule.
pub fn ispmt(rate: f64, per: f64, nper: f64, pv: f64) -> FinResult<f64> {
    if nper == 0.0 {
        return Err(FinError::domain("number of periods is zero"));
    }
    Ok(pv * rate * (per / nper - 1.0))
}

// =============================================================================
// Rate
// =============================================================================

fn balance(rate: f64, nper: f64, pmt: f64, pv: f64, fv: f64, typ: f64) -> f64 {
    if rate == 0.0 {
        return pv + pmt * nper + fv;
    }
    match pow1p(rate, nper) {
        Ok((g, g1)) => pv * g + pmt * (1.0 + rate * typ) * g1 / rate + fv,
        Err(_) => f64::NAN,
    }
}

fn balance_derivative(rate: f64, nper: f64, pmt: f64, pv: f64, typ: f64) -> f64 {
    if rate == 0.0 {
        return nper * pv + pmt * (nper * (nper - 1.0) / 2.0 + typ * nper);
    }
    match pow1p(rate, nper) {
        Ok((g, g1)) => {
            let dg = nper * g / (1.0 + rate);
            let annuity = g1 / rate;
            let dannuity = (dg * rate - g1) / (rate * rate);
            pv * dg + pmt * (typ * annuity + (1.0 + rate * typ) * dannuity)
        }
        Err(_) => f64::NAN,
    }
}

/// Interest rate per period of an annuity.
///
/// Solved iteratively from `guess` (or the configured default) on
/// `rate > -1`.
///
/// # Errors
///
/// - `DomainError` if `nper <= 0` or the guess is `<= -1`
/// - `NoSolution` if the solver does not converge
pub fn rate(
    nper: f64,
    pmt: f64,
    pv: f64,
    fv: f64,
    due: PaymentDue,
    guess: Option<f64>,
    config: &FinancialConfig,
) -> FinResult<f64> {
    if nper <= 0.0 {
        return Err(FinError::domain(format!("number of periods must be positive, got {nper}")));
    }
    let guess = guess.unwrap_or(config.default_guess);
    if guess <= -1.0 {
        return Err(FinError::domain(format!("guess must be greater than -1, got {guess}")));
    }

    let typ = due.factor();
    solve_with_derivative(
        "rate",
        |r| balance(r, nper, pmt, pv, fv, typ),
        |r| balance_derivative(r, nper, pmt, pv, typ),
        guess,
        Domain::above(-1.0),
        config,
    )
}
