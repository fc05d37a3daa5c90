//! # xlfin Math
//!
//! Root finding for the xlfin financial function library.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson, bisection, and a hybrid state machine
//!   that starts with Newton and falls back to bisection over an
//!   automatically discovered bracket
//! - **Domains**: open intervals that keep iterates away from values where
//!   the objective is undefined (for example a rate at or below -100%)
//!
//! ## Design Philosophy
//!
//! - **No stale answers**: a solver either converges or returns an error
//! - **Numerical Stability**: non-finite values never propagate silently

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
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, find_bracket, hybrid, hybrid_with_derivative, newton_raphson,
        newton_raphson_numerical, Domain, SolverConfig, SolverPhase, SolverResult,
    };
}

pub use error::{MathError, MathResult};
