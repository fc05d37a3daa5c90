//! Actual/Actual year fractions.

use crate::error::FinResult;
use crate::schedule::quasi_coupon_date;
use crate::types::{is_leap_year, Date, Frequency};

/// ICMA-style Actual/Actual year fraction.
///
/// Quasi-coupon periods are generated backward from `end`; each period
/// contributes the share of it that lies inside `[start, end]`, divided by
/// `frequency` times the period's actual length.
///
/// Expects `start < end`.
pub(crate) fn coupon_period_fraction(start: Date, end: Date, frequency: Frequency) -> FinResult<f64> {
    let f = frequency.as_f64();
    let mut total = 0.0;
    let mut period_end = end;
    let mut k = 1;

    loop {
        let period_start = quasi_coupon_date(end, frequency, -k)?;
        let period_days = period_start.days_between(&period_end) as f64;
        let accrual_start = period_start.max(start);

        total += accrual_start.days_between(&period_end) as f64 / (f * period_days);

        if period_start <= start {
            return Ok(total);
        }
        period_end = period_start;
        k += 1;
    }
}

/// Actual/Actual with a calendar-year denominator.
///
/// Spans of at most one year divide by 366 when the span touches a
/// February 29 (or lies entirely inside a leap year) and by 365 otherwise.
/// Longer spans divide by the average length of the calendar years they
/// cover.
///
/// Expects `start < end`.
pub(crate) fn actual_year_fraction(start: Date, end: Date) -> f64 {
    let days = start.days_between(&end) as f64;
    let (y1, y2) = (start.year(), end.year());

    let within_a_year = y1 == y2
        || (y2 == y1 + 1
            && (start.month() > end.month()
                || (start.month() == end.month() && start.day() >= end.day())));

    if within_a_year {
        let denominator = if (y1 == y2 && is_leap_year(y1)) || feb29_between(start, end) {
            366.0
        } else {
            365.0
        };
        return days / denominator;
    }

    let years = f64::from(y2 - y1 + 1);
    let covered: i64 = (y1..=y2)
        .map(|y| if is_leap_year(y) { 366 } else { 365 })
        .sum();

    days / (covered as f64 / years)
}

/// True if a February 29 falls inside `[start, end]`.
fn feb29_between(start: Date, end: Date) -> bool {
    (start.year()..=end.year()).any(|y| {
        is_leap_year(y) && Date::from_ymd(y, 2, 29).is_ok_and(|d| start <= d && d <= end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_full_coupon_period() {
        let yf = coupon_period_fraction(d(2025, 1, 15), d(2025, 7, 15), Frequency::SemiAnnual)
            .unwrap();
        assert_relative_eq!(yf, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_period() {
        // 2025-01-15 -> 2025-07-15 is 181 days; 90 of them are covered
        let yf = coupon_period_fraction(d(2025, 4, 16), d(2025, 7, 15), Frequency::SemiAnnual)
            .unwrap();
        assert_relative_eq!(yf, 90.0 / (2.0 * 181.0), epsilon = 1e-12);
    }

    #[test]
    fn test_multi_year_coupon_periods() {
        let yf = coupon_period_fraction(d(2020, 2, 29), d(2025, 2, 28), Frequency::Annual)
            .unwrap();
        assert_relative_eq!(yf, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_actual_year_within_year() {
        assert_relative_eq!(
            actual_year_fraction(d(2025, 1, 1), d(2025, 7, 1)),
            181.0 / 365.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            actual_year_fraction(d(2024, 1, 1), d(2024, 7, 1)),
            182.0 / 366.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_actual_year_crossing_feb29() {
        assert_relative_eq!(
            actual_year_fraction(d(2023, 12, 1), d(2024, 3, 1)),
            91.0 / 366.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_actual_year_multi_year_average() {
        // 2012-01-01 -> 2014-07-30: average of 366, 365, 365
        let days = d(2012, 1, 1).days_between(&d(2014, 7, 30)) as f64;
        assert_relative_eq!(
            actual_year_fraction(d(2012, 1, 1), d(2014, 7, 30)),
            days / (1096.0 / 3.0),
            epsilon = 1e-12
        );
    }
}
