//! # xlfin
//!
//! Spreadsheet-compatible financial functions.
//!
//! - **Coupons**: `coup_days`, `coup_days_bs`, `coup_days_nc`, `coup_num`,
//!   `coup_pcd`, `coup_ncd`, `year_frac`
//! - **Bonds**: `price`, `yield_to_maturity`, `price_mat`, `yield_mat`,
//!   `accrint`, `accrint_m`, `duration`, `mduration`
//! - **Cash flows**: `npv`, `xnpv`, `irr`, `xirr`, `mirr`
//! - **Annuities**: `pmt`, `ipmt`, `ppmt`, `rate`, `nper`, `fv`, `pv`, `ispmt`
//! - **Depreciation**: `sln`, `syd`, `ddb`, `db`
//! - **Misc**: `dollar_de`, `dollar_fr`, `effect`, `nominal`, `fv_schedule`
//!
//! Every function is a pure mapping from its arguments to a
//! [`FinResult`]. Iterative functions take a [`FinancialConfig`]; the
//! [`Financial`] facade bundles one so callers need not pass it around.
//!
//! ## Example
//!
//! ```rust
//! use xlfin::prelude::*;
//!
//! let fin = Financial::default();
//! let settlement = Date::from_ymd(2008, 2, 15).unwrap();
//! let maturity = Date::from_ymd(2016, 11, 15).unwrap();
//!
//! let y = fin
//!     .yield_to_maturity(
//!         settlement,
//!         maturity,
//!         0.0575,
//!         95.04287,
//!         100.0,
//!         Frequency::SemiAnnual,
//!         DayCountBasis::UsPsa30_360,
//!     )
//!     .unwrap();
//! assert!((y - 0.065).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod bonds;
pub mod cashflows;
pub mod config;
pub mod coupons;
pub mod depreciation;
mod financial;
pub mod misc;
mod solve;
pub mod tvm;

pub use config::{FinancialConfig, SolverSettings};
pub use financial::Financial;

pub use xlfin_core::daycounts::{ActualActualConvention, DayCountBasis};
pub use xlfin_core::error::{FinError, FinResult};
pub use xlfin_core::schedule::{CouponPeriod, CouponSchedule};
pub use xlfin_core::types::{Date, Frequency, PaymentDue};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::FinancialConfig;
    pub use crate::financial::Financial;
    pub use xlfin_core::prelude::*;
}
