//! # xlfin Core
//!
//! Dates, day count bases and coupon schedules for the xlfin financial
//! function library.
//!
//! This crate provides the calendar building blocks used by every formula:
//!
//! - **Types**: `Date`, `Frequency`, `PaymentDue`
//! - **Day Count Bases**: the five spreadsheet bases, dispatched through a
//!   single pure function per operation
//! - **Coupon Schedules**: previous/next coupon dates and the derived
//!   coupon-period day counts
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every calculation is recomputed from its arguments
//! - **Explicit Over Implicit**: invalid inputs surface as typed errors
//! - **Spreadsheet Fidelity**: month-end and February rules follow the
//!   published formulas
//!
//! ## Example
//!
//! ```rust
//! use xlfin_core::prelude::*;
//!
//! let settlement = Date::from_ymd(1984, 3, 4).unwrap();
//! let maturity = Date::from_ymd(1990, 4, 5).unwrap();
//!
//! let schedule = CouponSchedule::new(settlement, maturity, Frequency::Quarterly).unwrap();
//! assert_eq!(schedule.periods_remaining(), 25);
//! assert_eq!(days_between(schedule.previous_coupon(), settlement, DayCountBasis::UsPsa30_360), 59);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{
        annual_basis, days_between, year_fraction, ActualActualConvention, DayCountBasis,
    };
    pub use crate::error::{FinError, FinResult};
    pub use crate::schedule::{quasi_coupon_date, CouponPeriod, CouponSchedule};
    pub use crate::types::{Date, Frequency, PaymentDue};
}

// Re-export commonly used types at crate root
pub use daycounts::DayCountBasis;
pub use error::{FinError, FinResult};
pub use schedule::{CouponPeriod, CouponSchedule};
pub use types::{Date, Frequency, PaymentDue};
