//! Fractional dollar prices and interest-rate conversions.

use xlfin_core::error::{ensure_finite, FinError, FinResult};

/// Truncates a fractional-price denominator and rejects anything below one.
fn denominator(fraction: f64) -> FinResult<f64> {
    let fraction = fraction.trunc();
    if fraction < 1.0 {
        return Err(FinError::domain(format!(
            "fraction must be at least 1, got {fraction}"
        )));
    }
    Ok(fraction)
}

/// Smallest power of ten not below `fraction`.
fn decimal_scale(fraction: f64) -> f64 {
    10f64.powf(fraction.log10().ceil())
}

/// Converts a price quoted as `integer.numerator` over `fraction` into a
/// decimal number.
///
/// `dollar_de(1.02, 16.0)` reads 1 and 2/16, returning `1.125`.
pub fn dollar_de(fractional_dollar: f64, fraction: f64) -> FinResult<f64> {
    let fraction = denominator(fraction)?;
    let whole = fractional_dollar.trunc();
    let numerator = fractional_dollar - whole;
    ensure_finite(whole + numerator * decimal_scale(fraction) / fraction, "dollar_de")
}

/// Inverse of [`dollar_de`].
pub fn dollar_fr(decimal_dollar: f64, fraction: f64) -> FinResult<f64> {
    let fraction = denominator(fraction)?;
    let whole = decimal_dollar.trunc();
    let remainder = decimal_dollar - whole;
    ensure_finite(whole + remainder * fraction / decimal_scale(fraction), "dollar_fr")
}

fn compounding_periods(npery: f64) -> FinResult<f64> {
    let npery = npery.trunc();
    if npery < 1.0 {
        return Err(FinError::domain(format!(
            "compounding periods must be at least 1, got {npery}"
        )));
    }
    Ok(npery)
}

/// Effective annual rate of a nominal rate compounded `npery` times a year.
pub fn effect(nominal_rate: f64, npery: f64) -> FinResult<f64> {
    let n = compounding_periods(npery)?;
    if nominal_rate <= 0.0 {
        return Err(FinError::domain(format!(
            "nominal rate must be positive, got {nominal_rate}"
        )));
    }
    ensure_finite((1.0 + nominal_rate / n).powf(n) - 1.0, "effect")
}

/// Nominal annual rate that compounds to `effect_rate` over `npery` periods.
pub fn nominal(effect_rate: f64, npery: f64) -> FinResult<f64> {
    let n = compounding_periods(npery)?;
    if effect_rate <= 0.0 {
        return Err(FinError::domain(format!(
            "effective rate must be positive, got {effect_rate}"
        )));
    }
    ensure_finite(n * ((1.0 + effect_rate).powf(1.0 / n) - 1.0), "nominal")
}

/// Future value of `principal` under a sequence of per-period rates.
pub fn fv_schedule(principal: f64, schedule: &[f64]) -> FinResult<f64> {
    let growth: f64 = schedule.iter().map(|r| 1.0 + r).product();
    ensure_finite(principal * growth, "fv_schedule")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_dollar_de() {
        assert_abs_diff_eq!(dollar_de(1.02, 16.0).unwrap(), 1.125, epsilon = 1e-12);
        assert_abs_diff_eq!(dollar_de(1.1, 32.0).unwrap(), 1.3125, epsilon = 1e-12);
        assert_abs_diff_eq!(dollar_de(-1.02, 16.0).unwrap(), -1.125, epsilon = 1e-12);
        assert_abs_diff_eq!(dollar_de(1.5, 10.0).unwrap(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_dollar_fr() {
        assert_abs_diff_eq!(dollar_fr(1.125, 16.0).unwrap(), 1.02, epsilon = 1e-12);
        assert_abs_diff_eq!(dollar_fr(1.125, 32.0).unwrap(), 1.04, epsilon = 1e-12);
        assert_abs_diff_eq!(dollar_fr(1.125, 16.9).unwrap(), 1.02, epsilon = 1e-12);
    }

    #[test]
    fn test_fraction_below_one() {
        assert!(matches!(dollar_de(1.02, 0.5), Err(FinError::DomainError { .. })));
        assert!(matches!(dollar_fr(1.02, -4.0), Err(FinError::DomainError { .. })));
    }

    #[test]
    fn test_effect_nominal() {
        assert_abs_diff_eq!(effect(0.0525, 4.0).unwrap(), 0.053_542_667, epsilon = 1e-9);
        assert_abs_diff_eq!(nominal(0.053_543, 4.0).unwrap(), 0.052_500_319, epsilon = 1e-9);
        let e = effect(0.08, 12.0).unwrap();
        assert_abs_diff_eq!(nominal(e, 12.0).unwrap(), 0.08, epsilon = 1e-12);
        assert!(effect(0.0, 4.0).is_err());
        assert!(nominal(0.05, 0.0).is_err());
    }

    #[test]
    fn test_fv_schedule() {
        assert_abs_diff_eq!(fv_schedule(1.0, &[0.09, 0.11, 0.1]).unwrap(), 1.330_89, epsilon = 1e-12);
        assert_eq!(fv_schedule(250.0, &[]).unwrap(), 250.0);
    }
}
