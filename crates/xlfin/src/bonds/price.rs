//! Price and yield of periodic-coupon bonds.
//!
//! With `N` coupons remaining, coupon `C = 100 * rate / frequency`, period
//! length `E`, `A` days accrued and `DSC` days to the next coupon:
//!
//! ```text
//! N = 1:  P = (R + C) / (1 + DSC/E * y/f) - C * A/E
//! N > 1:  P = R / (1+y/f)^(N-1+DSC/E) + Σ C / (1+y/f)^(k-1+DSC/E) - C * A/E
//! ```

use xlfin_core::daycounts::DayCountBasis;
use xlfin_core::error::{ensure_finite, FinError, FinResult};
use xlfin_core::schedule::CouponSchedule;
use xlfin_core::types::{Date, Frequency};
use xlfin_math::solvers::Domain;

use super::{period_length, require_non_negative, require_positive};
use crate::config::FinancialConfig;
use crate::solve::solve;

/// Discounting inputs shared by price, yield and duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PricingTerms {
    /// Coupons remaining, maturity included.
    pub(crate) periods: u32,
    /// Accrued days over the period length.
    pub(crate) accrued_fraction: f64,
    /// Days to the next coupon over the period length.
    pub(crate) first_fraction: f64,
    /// Coupon per period on 100 face.
    pub(crate) coupon: f64,
    /// Redemption value on 100 face.
    pub(crate) redemption: f64,
    /// Coupons per year.
    pub(crate) frequency: f64,
}

impl PricingTerms {
    pub(crate) fn new(
        settlement: Date,
        maturity: Date,
        rate: f64,
        redemption: f64,
        frequency: Frequency,
        basis: DayCountBasis,
    ) -> FinResult<Self> {
        let schedule = CouponSchedule::new(settlement, maturity, frequency)?;
        let period = schedule.period(basis);
        let e = period_length(basis, frequency, period.previous_coupon, period.next_coupon);

        Ok(Self {
            periods: schedule.periods_remaining(),
            accrued_fraction: period.accrued_days as f64 / e,
            first_fraction: period.days_to_next as f64 / e,
            coupon: 100.0 * rate / frequency.as_f64(),
            redemption,
            frequency: frequency.as_f64(),
        })
    }

    /// Discounting exponent of the k-th remaining coupon (1-based).
    pub(crate) fn time(&self, k: u32) -> f64 {
        f64::from(k - 1) + self.first_fraction
    }

    /// Accrued interest per 100 face.
    pub(crate) fn accrued(&self) -> f64 {
        self.coupon * self.accrued_fraction
    }

    /// Clean price per 100 face at yield `yld`.
    pub(crate) fn price(&self, yld: f64) -> f64 {
        let f = self.frequency;

        if self.periods == 1 {
            return (self.redemption + self.coupon) / (1.0 + self.first_fraction * yld / f)
                - self.accrued();
        }

        let base = 1.0 + yld / f;
        let coupons: f64 = (1..=self.periods)
            .map(|k| self.coupon * base.powf(-self.time(k)))
            .sum();

        self.redemption * base.powf(-self.time(self.periods)) + coupons - self.accrued()
    }

    /// Closed-form yield when only the final coupon remains.
    fn single_period_yield(&self, pr: f64) -> FinResult<f64> {
        if self.first_fraction <= 0.0 {
            return Err(FinError::domain(
                "settlement falls on the final coupon date under this basis",
            ));
        }
        let dirty = pr + self.accrued();
        let y = ((self.redemption + self.coupon) / dirty - 1.0) * self.frequency
            / self.first_fraction;
        ensure_finite(y, "yield")
    }

    /// Starting point for the yield search: coupon plus straight-line pull
    /// to par over the average of price and redemption.
    fn yield_guess(&self, pr: f64) -> f64 {
        let years = self.time(self.periods) / self.frequency;
        let annual_coupon = self.coupon * self.frequency;
        let guess = (annual_coupon + (self.redemption - pr) / years) / ((self.redemption + pr) / 2.0);

        if guess.is_finite() {
            guess.max(-0.9 * self.frequency)
        } else {
            0.05
        }
    }
}

/// Clean price per 100 face value of a bond paying periodic interest.
///
/// # Arguments
///
/// * `settlement` - Settlement date
/// * `maturity` - Maturity date
/// * `rate` - Annual coupon rate
/// * `yld` - Annual yield
/// * `redemption` - Redemption value per 100 face value
/// * `frequency` - Coupons per year
/// * `basis` - Day count basis
///
/// # Errors
///
/// - `InvalidRange` if settlement is not before maturity
/// - `DomainError` if `rate < 0`, `yld < 0` or `redemption <= 0`
pub fn price(
    settlement: Date,
    maturity: Date,
    rate: f64,
    yld: f64,
    redemption: f64,
    frequency: Frequency,
    basis: DayCountBasis,
) -> FinResult<f64> {
    require_non_negative(rate, "rate")?;
    require_non_negative(yld, "yield")?;
    require_positive(redemption, "redemption")?;

    let terms = PricingTerms::new(settlement, maturity, rate, redemption, frequency, basis)?;
    ensure_finite(terms.price(yld), "price")
}

/// Yield of a bond paying periodic interest, the inverse of [`price`].
///
/// With one coupon remaining the yield has a closed form; otherwise the
/// price equation is solved on `yld > -frequency`.
///
/// # Errors
///
/// - `InvalidRange` if settlement is not before maturity
/// - `DomainError` if `rate < 0`, `pr <= 0` or `redemption <= 0`
/// - `NoSolution` if the solver does not converge
pub fn yield_to_maturity(
    settlement: Date,
    maturity: Date,
    rate: f64,
    pr: f64,
    redemption: f64,
    frequency: Frequency,
    basis: DayCountBasis,
    config: &FinancialConfig,
) -> FinResult<f64> {
    require_non_negative(rate, "rate")?;
    require_positive(pr, "price")?;
    require_positive(redemption, "redemption")?;

    let terms = PricingTerms::new(settlement, maturity, rate, redemption, frequency, basis)?;

    if terms.periods == 1 {
        log::debug!("yield: single coupon period, closed form");
        return terms.single_period_yield(pr);
    }

    let guess = terms.yield_guess(pr);
    solve(
        "yield",
        |y| terms.price(y) - pr,
        guess,
        Domain::above(-terms.frequency),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_price_reference() {
        let p = price(
            d(2008, 2, 15),
            d(2017, 11, 15),
            0.0575,
            0.065,
            100.0,
            Frequency::SemiAnnual,
            DayCountBasis::UsPsa30_360,
        )
        .unwrap();
        assert_abs_diff_eq!(p, 94.634361621, epsilon = 1e-6);
    }

    #[test]
    fn test_yield_reference() {
        let y = yield_to_maturity(
            d(2008, 2, 15),
            d(2016, 11, 15),
            0.0575,
            95.04287,
            100.0,
            Frequency::SemiAnnual,
            DayCountBasis::UsPsa30_360,
            &FinancialConfig::default(),
        )
        .unwrap();
        assert_abs_diff_eq!(y, 0.065, epsilon = 1e-6);
    }

    #[test]
    fn test_single_period_yield() {
        let y = yield_to_maturity(
            d(2015, 9, 21),
            d(2015, 10, 15),
            0.04625,
            105.124,
            100.0,
            Frequency::SemiAnnual,
            DayCountBasis::UsPsa30_360,
            &FinancialConfig::default(),
        )
        .unwrap();
        assert_abs_diff_eq!(y, -0.674_285_785_406_577, epsilon = 1e-6);
    }

    #[test]
    fn test_par_bond_on_coupon_date() {
        // On a coupon date a bond priced at par yields its coupon
        let p = price(
            d(2020, 6, 15),
            d(2030, 6, 15),
            0.05,
            0.05,
            100.0,
            Frequency::SemiAnnual,
            DayCountBasis::ActualActual,
        )
        .unwrap();
        assert_abs_diff_eq!(p, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_actual_actual_leap_period() {
        // Period 2023-08-31 .. 2024-02-29 has 182 actual days, not 365/2
        let (s, m) = (d(2024, 1, 10), d(2030, 8, 31));
        let f = Frequency::SemiAnnual;
        let b = DayCountBasis::ActualActual;

        let p = price(s, m, 0.05, 0.06, 100.0, f, b).unwrap();
        assert_abs_diff_eq!(p, 94.583_355_596, epsilon = 1e-6);

        let y = yield_to_maturity(s, m, 0.05, p, 100.0, f, b, &FinancialConfig::default()).unwrap();
        assert_abs_diff_eq!(y, 0.06, epsilon = 1e-9);
    }

    #[test]
    fn test_single_period_price_matches_closed_form_yield() {
        let (s, m) = (d(2024, 11, 2), d(2025, 3, 31));
        for basis in DayCountBasis::all() {
            let p = price(s, m, 0.06, 0.07, 100.0, Frequency::SemiAnnual, *basis).unwrap();
            let y = yield_to_maturity(
                s,
                m,
                0.06,
                p,
                100.0,
                Frequency::SemiAnnual,
                *basis,
                &FinancialConfig::default(),
            )
            .unwrap();
            assert_abs_diff_eq!(y, 0.07, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_domain_errors() {
        let (s, m) = (d(2020, 1, 1), d(2025, 1, 1));
        let f = Frequency::Annual;
        let b = DayCountBasis::Actual365;
        let cfg = FinancialConfig::default();

        assert!(matches!(
            price(s, m, -0.01, 0.05, 100.0, f, b),
            Err(FinError::DomainError { .. })
        ));
        assert!(matches!(
            price(s, m, 0.05, -0.05, 100.0, f, b),
            Err(FinError::DomainError { .. })
        ));
        assert!(matches!(
            price(s, m, 0.05, 0.05, 0.0, f, b),
            Err(FinError::DomainError { .. })
        ));
        assert!(matches!(
            yield_to_maturity(s, m, 0.05, 0.0, 100.0, f, b, &cfg),
            Err(FinError::DomainError { .. })
        ));
        assert!(matches!(
            yield_to_maturity(m, s, 0.05, 99.0, 100.0, f, b, &cfg),
            Err(FinError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_zero_coupon_yield() {
        // 5 annual periods, no coupons: 100 / (1+y)^5 = 78.35
        let y = yield_to_maturity(
            d(2020, 1, 1),
            d(2025, 1, 1),
            0.0,
            78.35,
            100.0,
            Frequency::Annual,
            DayCountBasis::UsPsa30_360,
            &FinancialConfig::default(),
        )
        .unwrap();
        assert_abs_diff_eq!(y, (100.0_f64 / 78.35).powf(0.2) - 1.0, epsilon = 1e-9);
    }
}
