//! 30/360 day counts.
//!
//! Both variants pretend every month has 30 days; they differ only in how
//! month-end days are adjusted before the subtraction.

use crate::types::Date;

/// Day count under the 30/360 fiction once the day-of-month values are adjusted.
#[inline]
fn thirty_360(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let y1 = start.year() as i64;
    let y2 = end.year() as i64;
    let m1 = start.month() as i64;
    let m2 = end.month() as i64;

    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

/// US (NASD / PSA) 30/360.
///
/// # Rules
///
/// 1. If D1 is the last day of February, change D1 to 30
/// 2. If D1 is 31, change D1 to 30
/// 3. If D2 is the last day of February AND D1 was last day of February, change D2 to 30
/// 4. If D2 is 31 AND D1 is now >= 30, change D2 to 30
///
/// Rule 4 reads D1 after rules 1 and 2, so a start on the last day of
/// February followed by an end on the 31st counts the end as day 30.
pub(crate) fn us_psa_days(start: Date, end: Date) -> i64 {
    let mut d1 = start.day() as i64;
    let mut d2 = end.day() as i64;

    let d1_was_feb_eom = start.is_last_day_of_february();

    if d1_was_feb_eom || d1 == 31 {
        d1 = 30;
    }

    if end.is_last_day_of_february() && d1_was_feb_eom {
        d2 = 30;
    } else if d2 == 31 && d1 >= 30 {
        d2 = 30;
    }

    thirty_360(start, end, d1, d2)
}

/// European 30E/360: the 31st becomes the 30th on both ends, unconditionally.
pub(crate) fn european_days(start: Date, end: Date) -> i64 {
    let d1 = (start.day() as i64).min(30);
    let d2 = (end.day() as i64).min(30);

    thirty_360(start, end, d1, d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_us_full_year() {
        assert_eq!(us_psa_days(d(2025, 1, 1), d(2026, 1, 1)), 360);
    }

    #[test]
    fn test_us_31st_both_ends() {
        // D1=31 -> 30, then D2=31 with D1>=30 -> 30
        assert_eq!(us_psa_days(d(2025, 1, 31), d(2025, 3, 31)), 60);
    }

    #[test]
    fn test_us_end_31_kept_when_start_early() {
        // D2 stays 31 because D1 < 30
        assert_eq!(us_psa_days(d(2025, 1, 15), d(2025, 3, 31)), 76);
    }

    #[test]
    fn test_us_feb_eom_start() {
        // Feb 28 (non-leap) is treated as day 30, so Mar 31 also becomes 30
        assert_eq!(us_psa_days(d(2025, 2, 28), d(2025, 3, 31)), 30);
        // Leap year: Feb 29 is the last day, Feb 28 is not
        assert_eq!(us_psa_days(d(2024, 2, 29), d(2024, 3, 31)), 30);
        assert_eq!(us_psa_days(d(2024, 2, 28), d(2024, 3, 31)), 33);
    }

    #[test]
    fn test_us_feb_eom_both_ends() {
        assert_eq!(us_psa_days(d(2023, 2, 28), d(2024, 2, 29)), 360);
    }

    #[test]
    fn test_us_boeing_accrual() {
        // Last coupon 2019-12-15 to settlement 2020-04-29
        assert_eq!(us_psa_days(d(2019, 12, 15), d(2020, 4, 29)), 134);
    }

    #[test]
    fn test_european() {
        assert_eq!(european_days(d(2025, 1, 15), d(2025, 3, 31)), 75);
        assert_eq!(european_days(d(2025, 1, 31), d(2025, 3, 31)), 60);
        // No February rule
        assert_eq!(european_days(d(2025, 2, 28), d(2025, 3, 31)), 32);
    }

    #[test]
    fn test_negative_span() {
        assert_eq!(us_psa_days(d(2025, 7, 15), d(2025, 1, 15)), -180);
        assert_eq!(european_days(d(2025, 7, 15), d(2025, 1, 15)), -180);
    }
}
