//! Domain value types.
//!
//! - [`Date`]: Calendar date with month-end aware arithmetic
//! - [`Frequency`]: Coupon frequency (1, 2 or 4 payments per year)
//! - [`PaymentDue`]: Payment timing within a period

mod date;
mod frequency;

pub use date::Date;
pub use frequency::{Frequency, PaymentDue};

pub(crate) use date::is_leap_year;
