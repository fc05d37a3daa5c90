//! Configured entry point for the whole function library.

use xlfin_core::daycounts::DayCountBasis;
use xlfin_core::error::FinResult;
use xlfin_core::types::{Date, Frequency, PaymentDue};

use crate::config::FinancialConfig;
use crate::{bonds, cashflows, coupons, depreciation, misc, tvm};

/// Financial function library bound to one [`FinancialConfig`].
///
/// Every method forwards to the free function of the same name, passing
/// the bound configuration to those that iterate or depend on the
/// Actual/Actual convention. The struct holds no other state and can be
/// shared freely across threads.
///
/// # Example
///
/// ```rust
/// use xlfin::prelude::*;
///
/// let fin = Financial::with_config(FinancialConfig::new().with_tolerance(1e-12));
/// let r = fin.irr(&[-123.0, 12.0, 15.0, 50.0, 200.0], Some(0.14)).unwrap();
/// assert!((r - 0.260952337).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Financial {
    config: FinancialConfig,
}

impl Financial {
    /// Creates a library with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library with a custom configuration.
    #[must_use]
    pub fn with_config(config: FinancialConfig) -> Self {
        Self { config }
    }

    /// Returns the bound configuration.
    #[must_use]
    pub fn config(&self) -> &FinancialConfig {
        &self.config
    }

    // =========================================================================
    // Coupon schedule
    // =========================================================================

    /// See [`coupons::coup_days`].
    pub fn coup_days(
        &self,
        settlement: Date,
        maturity: Date,
        frequency: Frequency,
        basis: DayCountBasis,
        issue: Option<Date>,
    ) -> FinResult<i64> {
        coupons::coup_days(settlement, maturity, frequency, basis, issue)
    }

    /// See [`coupons::coup_days_bs`].
    pub fn coup_days_bs(
        &self,
        settlement: Date,
        maturity: Date,
        frequency: Frequency,
        basis: DayCountBasis,
        issue: Option<Date>,
    ) -> FinResult<i64> {
        coupons::coup_days_bs(settlement, maturity, frequency, basis, issue)
    }

    /// See [`coupons::coup_days_nc`].
    pub fn coup_days_nc(
        &self,
        settlement: Date,
        maturity: Date,
        frequency: Frequency,
        basis: DayCountBasis,
        issue: Option<Date>,
    ) -> FinResult<i64> {
        coupons::coup_days_nc(settlement, maturity, frequency, basis, issue)
    }

    /// See [`coupons::coup_num`].
    pub fn coup_num(
        &self,
        settlement: Date,
        maturity: Date,
        frequency: Frequency,
        issue: Option<Date>,
    ) -> FinResult<u32> {
        coupons::coup_num(settlement, maturity, frequency, issue)
    }

    /// See [`coupons::coup_pcd`].
    pub fn coup_pcd(
        &self,
        settlement: Date,
        maturity: Date,
        frequency: Frequency,
        issue: Option<Date>,
    ) -> FinResult<Date> {
        coupons::coup_pcd(settlement, maturity, frequency, issue)
    }

    /// See [`coupons::coup_ncd`].
    pub fn coup_ncd(
        &self,
        settlement: Date,
        maturity: Date,
        frequency: Frequency,
        issue: Option<Date>,
    ) -> FinResult<Date> {
        coupons::coup_ncd(settlement, maturity, frequency, issue)
    }

    /// See [`coupons::year_frac`].
    pub fn year_frac(
        &self,
        start: Date,
        end: Date,
        frequency: Frequency,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        coupons::year_frac(start, end, frequency, basis, &self.config)
    }

    // =========================================================================
    // Bonds
    // =========================================================================

    /// See [`bonds::price`].
    pub fn price(
        &self,
        settlement: Date,
        maturity: Date,
        rate: f64,
        yld: f64,
        redemption: f64,
        frequency: Frequency,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::price(settlement, maturity, rate, yld, redemption, frequency, basis)
    }

    /// See [`bonds::yield_to_maturity`].
    pub fn yield_to_maturity(
        &self,
        settlement: Date,
        maturity: Date,
        rate: f64,
        pr: f64,
        redemption: f64,
        frequency: Frequency,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::yield_to_maturity(
            settlement,
            maturity,
            rate,
            pr,
            redemption,
            frequency,
            basis,
            &self.config,
        )
    }

    /// See [`bonds::price_mat`].
    pub fn price_mat(
        &self,
        settlement: Date,
        maturity: Date,
        issue: Date,
        rate: f64,
        yld: f64,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::price_mat(settlement, maturity, issue, rate, yld, basis, &self.config)
    }

    /// See [`bonds::yield_mat`].
    pub fn yield_mat(
        &self,
        settlement: Date,
        maturity: Date,
        issue: Date,
        rate: f64,
        pr: f64,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::yield_mat(settlement, maturity, issue, rate, pr, basis, &self.config)
    }

    /// See [`bonds::accrint`].
    pub fn accrint(
        &self,
        issue: Date,
        first_interest: Date,
        settlement: Date,
        rate: f64,
        par: f64,
        frequency: Frequency,
        basis: DayCountBasis,
        calc_method: bool,
    ) -> FinResult<f64> {
        bonds::accrint(
            issue,
            first_interest,
            settlement,
            rate,
            par,
            frequency,
            basis,
            calc_method,
        )
    }

    /// See [`bonds::accrint_m`].
    pub fn accrint_m(
        &self,
        issue: Date,
        settlement: Date,
        rate: f64,
        par: f64,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::accrint_m(issue, settlement, rate, par, basis, &self.config)
    }

    /// See [`bonds::duration`].
    pub fn duration(
        &self,
        settlement: Date,
        maturity: Date,
        coupon: f64,
        yld: f64,
        frequency: Frequency,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::duration(settlement, maturity, coupon, yld, frequency, basis)
    }

    /// See [`bonds::mduration`].
    pub fn mduration(
        &self,
        settlement: Date,
        maturity: Date,
        coupon: f64,
        yld: f64,
        frequency: Frequency,
        basis: DayCountBasis,
    ) -> FinResult<f64> {
        bonds::mduration(settlement, maturity, coupon, yld, frequency, basis)
    }

    // =========================================================================
    // Cash flows
    // =========================================================================

    /// See [`cashflows::npv`].
    pub fn npv(&self, rate: f64, values: &[f64]) -> FinResult<f64> {
        cashflows::npv(rate, values)
    }

    /// See [`cashflows::xnpv`].
    pub fn xnpv(&self, rate: f64, values: &[f64], dates: &[Date]) -> FinResult<f64> {
        cashflows::xnpv(rate, values, dates)
    }

    /// See [`cashflows::irr`].
    pub fn irr(&self, values: &[f64], guess: Option<f64>) -> FinResult<f64> {
        cashflows::irr(values, guess, &self.config)
    }

    /// See [`cashflows::xirr`].
    pub fn xirr(&self, values: &[f64], dates: &[Date], guess: Option<f64>) -> FinResult<f64> {
        cashflows::xirr(values, dates, guess, &self.config)
    }

    /// See [`cashflows::mirr`].
    pub fn mirr(&self, values: &[f64], finance_rate: f64, reinvest_rate: f64) -> FinResult<f64> {
        cashflows::mirr(values, finance_rate, reinvest_rate)
    }

    // =========================================================================
    // Annuities
    // =========================================================================

    /// See [`tvm::pmt`].
    pub fn pmt(&self, rate: f64, nper: f64, pv: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
        tvm::pmt(rate, nper, pv, fv, due)
    }

    /// See [`tvm::ipmt`].
    pub fn ipmt(
        &self,
        rate: f64,
        per: f64,
        nper: f64,
        pv: f64,
        fv: f64,
        due: PaymentDue,
    ) -> FinResult<f64> {
        tvm::ipmt(rate, per, nper, pv, fv, due)
    }

    /// See [`tvm::ppmt`].
    pub fn ppmt(
        &self,
        rate: f64,
        per: f64,
        nper: f64,
        pv: f64,
        fv: f64,
        due: PaymentDue,
    ) -> FinResult<f64> {
        tvm::ppmt(rate, per, nper, pv, fv, due)
    }

    /// See [`tvm::rate`].
    pub fn rate(
        &self,
        nper: f64,
        pmt: f64,
        pv: f64,
        fv: f64,
        due: PaymentDue,
        guess: Option<f64>,
    ) -> FinResult<f64> {
        tvm::rate(nper, pmt, pv, fv, due, guess, &self.config)
    }

    /// See [`tvm::nper`].
    pub fn nper(&self, rate: f64, pmt: f64, pv: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
        tvm::nper(rate, pmt, pv, fv, due)
    }

    /// See [`tvm::fv`].
    pub fn fv(&self, rate: f64, nper: f64, pmt: f64, pv: f64, due: PaymentDue) -> FinResult<f64> {
        tvm::fv(rate, nper, pmt, pv, due)
    }

    /// See [`tvm::pv`].
    pub fn pv(&self, rate: f64, nper: f64, pmt: f64, fv: f64, due: PaymentDue) -> FinResult<f64> {
        tvm::pv(rate, nper, pmt, fv, due)
    }

    /// See [`tvm::ispmt`].
    pub fn ispmt(&self, rate: f64, per: f64, nper: f64, pv: f64) -> FinResult<f64> {
        tvm::ispmt(rate, per, nper, pv)
    }

    // =========================================================================
    // Depreciation
    // =========================================================================

    /// See [`depreciation::sln`].
    pub fn sln(&self, cost: f64, salvage: f64, life: f64) -> FinResult<f64> {
        depreciation::sln(cost, salvage, life)
    }

    /// See [`depreciation::syd`].
    pub fn syd(&self, cost: f64, salvage: f64, life: f64, per: f64) -> FinResult<f64> {
        depreciation::syd(cost, salvage, life, per)
    }

    /// See [`depreciation::ddb`].
    pub fn ddb(&self, cost: f64, salvage: f64, life: f64, period: f64, factor: f64) -> FinResult<f64> {
        depreciation::ddb(cost, salvage, life, period, factor)
    }

    /// See [`depreciation::db`].
    pub fn db(&self, cost: f64, salvage: f64, life: f64, period: f64, months: f64) -> FinResult<f64> {
        depreciation::db(cost, salvage, life, period, months)
    }

    // =========================================================================
    // Misc
    // =========================================================================

    /// See [`misc::dollar_de`].
    pub fn dollar_de(&self, fractional_dollar: f64, fraction: f64) -> FinResult<f64> {
        misc::dollar_de(fractional_dollar, fraction)
    }

    /// See [`misc::dollar_fr`].
    pub fn dollar_fr(&self, decimal_dollar: f64, fraction: f64) -> FinResult<f64> {
        misc::dollar_fr(decimal_dollar, fraction)
    }

    /// See [`misc::effect`].
    pub fn effect(&self, nominal_rate: f64, npery: f64) -> FinResult<f64> {
        misc::effect(nominal_rate, npery)
    }

    /// See [`misc::nominal`].
    pub fn nominal(&self, effect_rate: f64, npery: f64) -> FinResult<f64> {
        misc::nominal(effect_rate, npery)
    }

    /// See [`misc::fv_schedule`].
    pub fn fv_schedule(&self, principal: f64, schedule: &[f64]) -> FinResult<f64> {
        misc::fv_schedule(principal, schedule)
    }
}
