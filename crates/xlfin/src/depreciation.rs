//! Asset depreciation schedules.

use xlfin_core::error::{FinError, FinResult};

/// Default multiplier for [`ddb`].
pub const DEFAULT_DDB_FACTOR: f64 = 2.0;

fn require_asset(cost: f64, salvage: f64, life: f64) -> FinResult<()> {
    if cost < 0.0 || salvage < 0.0 {
        return Err(FinError::domain(format!(
            "cost {cost} and salvage {salvage} must be non-negative"
        )));
    }
    if life <= 0.0 {
        return Err(FinError::domain(format!("life must be positive, got {life}")));
    }
    Ok(())
}

fn require_period(period: f64, last: f64) -> FinResult<()> {
    if period < 1.0 || period > last {
        Err(FinError::invalid_range(format!(
            "period {period} outside 1..={last}"
        )))
    } else {
        Ok(())
    }
}

/// Straight-line depreciation for one period.
pub fn sln(cost: f64, salvage: f64, life: f64) -> FinResult<f64> {
    if life == 0.0 {
        return Err(FinError::domain("life is zero"));
    }
    Ok((cost - salvage) / life)
}

/// Sum-of-years'-digits depreciation for period `per`.
pub fn syd(cost: f64, salvage: f64, life: f64, per: f64) -> FinResult<f64> {
    require_asset(cost, salvage, life)?;
    require_period(per, life)?;

    Ok((cost - salvage) * (life - per + 1.0) * 2.0 / (life * (life + 1.0)))
}

/// Declining-balance depreciation at `factor / life` per period.
///
/// Depreciation never takes the book value below `salvage`. A rate of 100 %
/// or more writes the whole depreciable amount off in the first period.
///
/// # Errors
///
/// - `DomainError` for negative cost or salvage, non-positive life or factor
/// - `InvalidRange` unless `1 <= period <= life`
pub fn ddb(cost: f64, salvage: f64, life: f64, period: f64, factor: f64) -> FinResult<f64> {
    require_asset(cost, salvage, life)?;
    require_period(period, life)?;
    if factor <= 0.0 {
        return Err(FinError::domain(format!("factor must be positive, got {factor}")));
    }

    let rate = factor / life;
    if rate >= 1.0 {
        return Ok(if period == 1.0 {
            (cost - salvage).max(0.0)
        } else {
            0.0
        });
    }

    let before = cost * (1.0 - rate).powf(period - 1.0);
    let after = cost * (1.0 - rate).powf(period);
    let depreciation = if after < salvage {
        before - salvage
    } else {
        before - after
    };
    Ok(depreciation.max(0.0))
}

/// Fixed-declining-balance depreciation.
///
/// The rate is `1 - (salvage/cost)^(1/life)` rounded to three decimals.
/// The first year is prorated by `months / 12`; when it is short, the
/// remainder is taken in an extra period `life + 1`.
///
/// # Errors
///
/// - `DomainError` for negative cost or salvage, non-positive life, or
///   `months` outside 1..=12
/// - `InvalidRange` for a period outside the schedule
pub fn db(cost: f64, salvage: f64, life: f64, period: f64, months: f64) -> FinResult<f64> {
    require_asset(cost, salvage, life)?;
    if !(1.0..=12.0).contains(&months) {
        return Err(FinError::domain(format!("months must be in 1..=12, got {months}")));
    }
    let last = if months < 12.0 { life + 1.0 } else { life };
    require_period(period, last)?;
    if cost == 0.0 {
        return Ok(0.0);
    }

    let rate = ((1.0 - (salvage / cost).powf(1.0 / life)) * 1000.0).round() / 1000.0;
    let first = cost * rate * months / 12.0;
    if period == 1.0 {
        return Ok(first);
    }

    let mut total = first;
    let mut depreciation = first;
    let whole_years = period.floor() as u32;
    for year in 2..=whole_years {
        depreciation = if f64::from(year) > life {
            (cost - total) * rate * (12.0 - months) / 12.0
        } else {
            (cost - total) * rate
        };
        total += depreciation;
    }
    Ok(depreciation)
}
