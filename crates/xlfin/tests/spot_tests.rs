//! Spreadsheet reference scenarios.
//!
//! Each case reproduces a published worksheet result to 1e-6.

use approx::assert_abs_diff_eq;
use xlfin::prelude::*;
use xlfin::{bonds, cashflows, coupons, depreciation, misc, tvm};

const TOLERANCE: f64 = 1e-6;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

// =============================================================================
// Yield
// =============================================================================

#[test]
fn yield_single_period_closed_form() {
    let y = Financial::new()
        .yield_to_maturity(
            d(2015, 9, 21),
            d(2015, 10, 15),
            0.04625,
            105.124,
            100.0,
            Frequency::SemiAnnual,
            DayCountBasis::UsPsa30_360,
        )
        .unwrap();
    assert_abs_diff_eq!(y, -0.674_285_785_406_577_02, epsilon = TOLERANCE);
}

#[test]
fn yield_multi_period_solved() {
    let y = Financial::new()
        .yield_to_maturity(
            d(2008, 2, 15),
            d(2016, 11, 15),
            0.0575,
            95.04287,
            100.0,
            Frequency::SemiAnnual,
            DayCountBasis::UsPsa30_360,
        )
        .unwrap();
    assert_abs_diff_eq!(y, 0.065, epsilon = TOLERANCE);
}

#[test]
fn price_reference() {
    let p = bonds::price(
        d(2008, 2, 15),
        d(2017, 11, 15),
        0.0575,
        0.065,
        100.0,
        Frequency::SemiAnnual,
        DayCountBasis::UsPsa30_360,
    )
    .unwrap();
    assert_abs_diff_eq!(p, 94.634_361_62, epsilon = TOLERANCE);
}

#[test]
fn duration_reference() {
    let args = (
        d(2008, 1, 1),
        d(2016, 1, 1),
        0.08,
        0.09,
        Frequency::SemiAnnual,
        DayCountBasis::ActualActual,
    );
    let dur = bonds::duration(args.0, args.1, args.2, args.3, args.4, args.5).unwrap();
    let mdur = bonds::mduration(args.0, args.1, args.2, args.3, args.4, args.5).unwrap();
    assert_abs_diff_eq!(dur, 5.993_775, epsilon = TOLERANCE);
    assert_abs_diff_eq!(mdur, 5.735_670, epsilon = TOLERANCE);
}

#[test]
fn maturity_securities_reference() {
    let config = FinancialConfig::default();
    let p = bonds::price_mat(
        d(2008, 2, 15),
        d(2008, 4, 13),
        d(2007, 11, 11),
        0.061,
        0.061,
        DayCountBasis::UsPsa30_360,
        &config,
    )
    .unwrap();
    assert_abs_diff_eq!(p, 99.984_498_88, epsilon = TOLERANCE);

    let y = bonds::yield_mat(
        d(2008, 3, 15),
        d(2008, 11, 3),
        d(2007, 11, 8),
        0.0625,
        100.0123,
        DayCountBasis::UsPsa30_360,
        &config,
    )
    .unwrap();
    assert_abs_diff_eq!(y, 0.060_954_334, epsilon = TOLERANCE);
}

#[test]
fn accrued_interest_reference() {
    let a = bonds::accrint(
        d(2008, 3, 1),
        d(2008, 8, 31),
        d(2008, 5, 1),
        0.1,
        1_000.0,
        Frequency::SemiAnnual,
        DayCountBasis::UsPsa30_360,
        true,
    )
    .unwrap();
    assert_abs_diff_eq!(a, 16.666_667, epsilon = TOLERANCE);

    let m = bonds::accrint_m(
        d(2008, 4, 1),
        d(2008, 6, 15),
        0.1,
        1_000.0,
        DayCountBasis::Actual365,
        &FinancialConfig::default(),
    )
    .unwrap();
    assert_abs_diff_eq!(m, 20.547_945, epsilon = TOLERANCE);
}

// =============================================================================
// Coupon schedule
// =============================================================================

#[test]
fn coupon_days_quarterly() {
    let (s, m, f, b) = (
        d(1984, 3, 4),
        d(1990, 4, 5),
        Frequency::Quarterly,
        DayCountBasis::UsPsa30_360,
    );
    assert_eq!(coupons::coup_days(s, m, f, b, None).unwrap(), 90);
    assert_eq!(coupons::coup_days_bs(s, m, f, b, None).unwrap(), 59);
    assert_eq!(coupons::coup_days_nc(s, m, f, b, None).unwrap(), 31);
    assert_eq!(coupons::coup_num(s, m, f, None).unwrap(), 25);
}

#[test]
fn coupon_days_actual_actual() {
    let (s, m, f, b) = (
        d(2011, 1, 25),
        d(2011, 11, 15),
        Frequency::SemiAnnual,
        DayCountBasis::ActualActual,
    );
    assert_eq!(coupons::coup_days_bs(s, m, f, b, None).unwrap(), 71);
    assert_eq!(coupons::coup_days(s, m, f, b, None).unwrap(), 181);
    assert_eq!(coupons::coup_days_nc(s, m, f, b, None).unwrap(), 110);
    assert_eq!(coupons::coup_pcd(s, m, f, None).unwrap(), d(2010, 11, 15));
    assert_eq!(coupons::coup_ncd(s, m, f, None).unwrap(), d(2011, 5, 15));
    assert_eq!(coupons::coup_num(s, m, f, None).unwrap(), 2);
}

#[test]
fn coupon_functions_reject_reversed_dates() {
    let err = coupons::coup_days(
        d(1990, 4, 5),
        d(1984, 3, 4),
        Frequency::Quarterly,
        DayCountBasis::UsPsa30_360,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, FinError::InvalidRange { .. }));
}

// =============================================================================
// Cash flows
// =============================================================================

#[test]
fn xnpv_reference() {
    let v = cashflows::xnpv(
        0.14,
        &[1.0, 3.0, 4.0],
        &[d(1970, 3, 2), d(1988, 2, 3), d(1999, 3, 5)],
    )
    .unwrap();
    assert_abs_diff_eq!(v, 1.375_214, epsilon = TOLERANCE);
}

#[test]
fn irr_reference() {
    let r = Financial::new()
        .irr(&[-123.0, 12.0, 15.0, 50.0, 200.0], Some(0.14))
        .unwrap();
    assert_abs_diff_eq!(r, 0.260_952_337, epsilon = TOLERANCE);
}

#[test]
fn mirr_reference() {
    let r = cashflows::mirr(&[-123.0, 12.0, 15.0, 50.0, 200.0], 0.14, 0.12).unwrap();
    assert_abs_diff_eq!(r, 0.240_933_687_3, epsilon = TOLERANCE);
}

#[test]
fn irr_without_sign_change_has_no_solution() {
    let err = Financial::new().irr(&[10.0, 20.0, 30.0], None).unwrap_err();
    assert!(err.is_no_solution());
}

// =============================================================================
// Closed forms
// =============================================================================

#[test]
fn annuity_reference() {
    let due = PaymentDue::EndOfPeriod;
    assert_abs_diff_eq!(
        tvm::pmt(0.08 / 12.0, 10.0, 10_000.0, 0.0, due).unwrap(),
        -1_037.032_089,
        epsilon = TOLERANCE
    );
    let r = tvm::rate(48.0, -200.0, 8_000.0, 0.0, due, None, &FinancialConfig::default()).unwrap();
    assert_abs_diff_eq!(r, 0.007_701_472, epsilon = TOLERANCE);
}

#[test]
fn depreciation_reference() {
    assert_abs_diff_eq!(depreciation::sln(30_000.0, 7_500.0, 10.0).unwrap(), 2_250.0);
    assert_abs_diff_eq!(
        depreciation::ddb(2_400.0, 300.0, 10.0, 2.0, 1.5).unwrap(),
        306.0,
        epsilon = TOLERANCE
    );
    assert_abs_diff_eq!(
        depreciation::db(1_000_000.0, 100_000.0, 6.0, 1.0, 7.0).unwrap(),
        186_083.333_333,
        epsilon = 1e-3
    );
}

#[test]
fn misc_reference() {
    assert_abs_diff_eq!(misc::dollar_de(1.02, 16.0).unwrap(), 1.125, epsilon = TOLERANCE);
    assert_abs_diff_eq!(misc::effect(0.0525, 4.0).unwrap(), 0.053_542_667, epsilon = TOLERANCE);
    assert_abs_diff_eq!(
        misc::fv_schedule(1.0, &[0.09, 0.11, 0.1]).unwrap(),
        1.330_89,
        epsilon = TOLERANCE
    );
}

#[test]
fn config_from_toml_drives_solver() {
    let config = FinancialConfig::from_toml_str(
        r#"
        default_guess = 0.2

        [solver]
        tolerance = 1e-12
        max_iterations = 200
        "#,
    )
    .unwrap();
    let fin = Financial::with_config(config);
    let r = fin.irr(&[-123.0, 12.0, 15.0, 50.0, 200.0], None).unwrap();
    assert_abs_diff_eq!(r, 0.260_952_337, epsilon = TOLERANCE);
}
