//! Securities that pay all interest at maturity.
//!
//! ```text
//! P = 100 (1 + rate * IM) / (1 + yld * SM) - 100 * rate * IS
//! ```
//!
//! where `IM`, `SM` and `IS` are the year fractions issue→maturity,
//! settlement→maturity and issue→settlement under the chosen basis.

use xlfin_core::daycounts::{year_fraction, DayCountBasis};
use xlfin_core::error::{ensure_finite, FinError, FinResult};
use xlfin_core::types::{Date, Frequency};

use super::{require_non_negative, require_positive};
use crate::config::FinancialConfig;

struct MaturityTerms {
    issue_to_maturity: f64,
    settlement_to_maturity: f64,
    issue_to_settlement: f64,
}

impl MaturityTerms {
    fn new(
        settlement: Date,
        maturity: Date,
        issue: Date,
        basis: DayCountBasis,
        config: &FinancialConfig,
    ) -> FinResult<Self> {
        if settlement >= maturity {
            return Err(FinError::invalid_range(format!(
                "settlement {settlement} must be before maturity {maturity}"
            )));
        }
        if issue > settlement {
            return Err(FinError::invalid_range(format!(
                "issue {issue} must not be after settlement {settlement}"
            )));
        }

        let yf = |a: Date, b: Date| {
            year_fraction(a, b, basis, Frequency::Annual, config.actual_actual)
        };

        Ok(Self {
            issue_to_maturity: yf(issue, maturity)?,
            settlement_to_maturity: yf(settlement, maturity)?,
            issue_to_settlement: yf(issue, settlement)?,
        })
    }
}

/// Price per 100 face value of a security that pays interest at maturity.
///
/// # Errors
///
/// - `InvalidRange` if settlement is not before maturity or issue is after
///   settlement
/// - `DomainError` if `rate < 0` or `yld < 0`
pub fn price_mat(
    settlement: Date,
    maturity: Date,
    issue: Date,
    rate: f64,
    yld: f64,
    basis: DayCountBasis,
    config: &FinancialConfig,
) -> FinResult<f64> {
    require_non_negative(rate, "rate")?;
    require_non_negative(yld, "yield")?;

    let t = MaturityTerms::new(settlement, maturity, issue, basis, config)?;
    let p = 100.0 * (1.0 + rate * t.issue_to_maturity) / (1.0 + yld * t.settlement_to_maturity)
        - 100.0 * rate * t.issue_to_settlement;

    ensure_finite(p, "price")
}

/// Annual yield of a security that pays interest at maturity.
///
/// # Errors
///
/// - `InvalidRange` as for [`price_mat`]
/// - `DomainError` if `rate < 0` or `pr <= 0`
pub fn yield_mat(
    settlement: Date,
    maturity: Date,
    issue: Date,
    rate: f64,
    pr: f64,
    basis: DayCountBasis,
    config: &FinancialConfig,
) -> FinResult<f64> {
    require_non_negative(rate, "rate")?;
    require_positive(pr, "price")?;

    let t = MaturityTerms::new(settlement, maturity, issue, basis, config)?;
    let dirty = pr + 100.0 * rate * t.issue_to_settlement;
    let y = (100.0 * (1.0 + rate * t.issue_to_maturity) / dirty - 1.0) / t.settlement_to_maturity;

    ensure_finite(y, "yield")
}
