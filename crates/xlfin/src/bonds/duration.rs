//! Macaulay and modified duration.

use xlfin_core::daycounts::DayCountBasis;
use xlfin_core::error::{ensure_finite, FinResult};
use xlfin_core::types::{Date, Frequency};

use super::price::PricingTerms;
use super::require_non_negative;

impl PricingTerms {
    /// Present-value weighted average time of the cash flows, in years.
    pub(crate) fn macaulay_duration(&self, yld: f64) -> f64 {
        let base = 1.0 + yld / self.frequency;
        let mut weighted = 0.0;
        let mut present_value = 0.0;

        for k in 1..=self.periods {
            let t = self.time(k);
            let pv = self.coupon * base.powf(-t);
            weighted += t * pv;
            present_value += pv;
        }

        let t_n = self.time(self.periods);
        let pv = self.redemption * base.powf(-t_n);
        weighted += t_n * pv;
        present_value += pv;

        weighted / present_value / self.frequency
    }
}

/// Macaulay duration, in years, of a security with a par value of 100.
///
/// # Errors
///
/// - `InvalidRange` if settlement is not before maturity
/// - `DomainError` if `coupon < 0` or `yld < 0`
pub fn duration(
    settlement: Date,
    maturity: Date,
    coupon: f64,
    yld: f64,
    frequency: Frequency,
    basis: DayCountBasis,
) -> FinResult<f64> {
    require_non_negative(coupon, "coupon")?;
    require_non_negative(yld, "yield")?;

    let terms = PricingTerms::new(settlement, maturity, coupon, 100.0, frequency, basis)?;
    ensure_finite(terms.macaulay_duration(yld), "duration")
}

/// Modified duration: Macaulay duration divided by `1 + yld / frequency`.
pub fn mduration(
    settlement: Date,
    maturity: Date,
    coupon: f64,
    yld: f64,
    frequency: Frequency,
    basis: DayCountBasis,
) -> FinResult<f64> {
    let macaulay = duration(settlement, maturity, coupon, yld, frequency, basis)?;
    Ok(macaulay / (1.0 + yld / frequency.as_f64()))
}
