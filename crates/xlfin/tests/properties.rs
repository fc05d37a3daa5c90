//! Property-based tests for the formula invariants.
//!
//! - Coupon days before and after settlement partition the period
//! - Yield inverts price
//! - The IRR zeroes the discounted sum
//! - MIRR ignores positive scaling of the series

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use xlfin::prelude::*;
use xlfin::{bonds, cashflows, coupons};

// =============================================================================
// GENERATORS
// =============================================================================

fn date_strategy() -> impl Strategy<Value = Date> {
    (1990i32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
}

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Annual),
        Just(Frequency::SemiAnnual),
        Just(Frequency::Quarterly),
    ]
}

fn basis_strategy() -> impl Strategy<Value = DayCountBasis> {
    prop::sample::select(DayCountBasis::all().to_vec())
}

/// Settlement plus a maturity between one month and thirty years later.
fn bond_dates() -> impl Strategy<Value = (Date, Date)> {
    (date_strategy(), 1i32..360, 0i64..31).prop_map(|(settlement, months, days)| {
        (settlement, settlement.add_months(months).unwrap().add_days(days))
    })
}

/// An outlay followed by 2 to 12 returns whose total exceeds it.
fn investment_strategy() -> impl Strategy<Value = Vec<f64>> {
    (100.0f64..10_000.0, prop::collection::vec(0.0f64..1.0, 2..12)).prop_map(|(outlay, weights)| {
        let total: f64 = weights.iter().sum::<f64>().max(1e-3);
        let scale = outlay * 1.5 / total;
        std::iter::once(-outlay)
            .chain(weights.iter().map(|w| w * scale + 1.0))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn coupon_days_partition_period(
        (settlement, maturity) in bond_dates(),
        frequency in frequency_strategy(),
        basis in basis_strategy(),
    ) {
        let days = coupons::coup_days(settlement, maturity, frequency, basis, None).unwrap();
        let before = coupons::coup_days_bs(settlement, maturity, frequency, basis, None).unwrap();
        let after = coupons::coup_days_nc(settlement, maturity, frequency, basis, None).unwrap();
        prop_assert_eq!(before + after, days);
        prop_assert!(before >= 0);
        prop_assert!(after >= 0);
    }

    #[test]
    fn yield_inverts_price(
        (settlement, maturity) in bond_dates(),
        frequency in frequency_strategy(),
        basis in basis_strategy(),
        rate in 0.0f64..0.15,
        yld in 0.001f64..0.2,
    ) {
        // 30E/360 can leave no days between settlement and the final coupon
        let to_next = coupons::coup_days_nc(settlement, maturity, frequency, basis, None).unwrap();
        prop_assume!(to_next > 0);

        let pr = bonds::price(settlement, maturity, rate, yld, 100.0, frequency, basis).unwrap();
        let solved = Financial::new()
            .yield_to_maturity(settlement, maturity, rate, pr, 100.0, frequency, basis)
            .unwrap();
        prop_assert!((solved - yld).abs() < 1e-6, "yield {} vs {}", solved, yld);
    }

    #[test]
    fn irr_zeroes_npv(values in investment_strategy()) {
        let r = cashflows::irr(&values, None, &FinancialConfig::default()).unwrap();
        // npv discounts one extra period, which does not move its zero
        let residual = cashflows::npv(r, &values).unwrap() * (1.0 + r);
        prop_assert!(residual.abs() < 1e-6, "residual {} at {}", residual, r);
    }

    #[test]
    fn mirr_is_scale_invariant(
        values in investment_strategy(),
        scale in 0.01f64..1_000.0,
        finance in 0.0f64..0.2,
        reinvest in 0.0f64..0.2,
    ) {
        let scaled: Vec<f64> = values.iter().map(|v| v * scale).collect();
        let base = cashflows::mirr(&values, finance, reinvest).unwrap();
        let other = cashflows::mirr(&scaled, finance, reinvest).unwrap();
        prop_assert!((base - other).abs() < 1e-9);
    }
}

#[test]
fn thirty_360_month_end_span() {
    let start = Date::from_ymd(2025, 1, 31).unwrap();
    let end = Date::from_ymd(2025, 3, 31).unwrap();
    assert_eq!(days_between(start, end, DayCountBasis::UsPsa30_360), 60);
    assert_abs_diff_eq!(
        coupons::year_frac(start, end, Frequency::Annual, DayCountBasis::UsPsa30_360, &FinancialConfig::default())
            .unwrap(),
        60.0 / 360.0,
        epsilon = 1e-12
    );
}
