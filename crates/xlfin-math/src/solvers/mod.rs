//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: Quadratic convergence when a derivative is available
//! - [`newton_raphson_numerical`]: Newton with a central-difference derivative
//! - [`bisection`]: Slow but certain once a bracket is known
//! - [`hybrid`]: Newton first, bisection over a discovered bracket when
//!   Newton stalls or leaves the [`Domain`]
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess, domain |
//!
//! *When a sign change exists within reach of the guess.
//!
//! # Example: Yield of an annual bond
//!
//! ```rust
//! use xlfin_math::solvers::{hybrid, Domain, SolverConfig};
//!
//! // 5% coupon, 5 years, price 95
//! let price_error = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let result = hybrid(price_error, 0.05, Domain::above(-1.0), &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::{find_bracket, hybrid, hybrid_with_derivative};
pub use newton::{newton_raphson, newton_raphson_numerical};

use crate::error::MathError;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivative magnitude below which a Newton step is not attempted.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence, applied to both |f(x)| and |Δx|.
    pub tolerance: f64,
    /// Maximum number of iterations per solver phase.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

/// Open interval of admissible arguments.
///
/// Bounds are exclusive; `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Domain {
    /// Exclusive lower bound.
    pub lower: Option<f64>,
    /// Exclusive upper bound.
    pub upper: Option<f64>,
}

impl Domain {
    /// The whole real line.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// All values strictly greater than `lower`.
    #[must_use]
    pub const fn above(lower: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// All values strictly between `lower` and `upper`.
    #[must_use]
    pub const fn between(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// True if `x` is finite and strictly inside the bounds.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x.is_finite()
            && self.lower.map_or(true, |lo| x > lo)
            && self.upper.map_or(true, |hi| x < hi)
    }

    /// Moves `x` just inside the bounds if it lies on or beyond them.
    #[must_use]
    pub fn nudge_inside(&self, x: f64) -> f64 {
        let mut x = x;
        if let Some(lo) = self.lower {
            let floor = lo + margin(lo);
            if x < floor {
                x = floor;
            }
        }
        if let Some(hi) = self.upper {
            let ceiling = hi - margin(hi);
            if x > ceiling {
                x = ceiling;
            }
        }
        x
    }
}

fn margin(bound: f64) -> f64 {
    1e-9 * bound.abs().max(1.0)
}

/// State of the hybrid solver.
///
/// The solver starts in `Newton`, may move to `Bisecting` once, and always
/// ends in `Converged` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverPhase {
    /// Newton iteration from the given point.
    Newton {
        /// Current iterate.
        x: f64,
    },
    /// Bisection over a bracket known to contain a sign change.
    Bisecting {
        /// Lower end of the bracket.
        lo: f64,
        /// Upper end of the bracket.
        hi: f64,
    },
    /// A root was found.
    Converged(SolverResult),
    /// No root could be found.
    Failed(MathError),
}

impl SolverPhase {
    /// True once the solver has stopped.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverPhase::Converged(_) | SolverPhase::Failed(_))
    }
}

/// True if `a` and `b` lie on different sides of zero, or either is zero.
pub(crate) fn straddles_zero(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    a == 0.0 || b == 0.0 || a.is_sign_negative() != b.is_sign_negative()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);
        assert_eq!(config, SolverConfig::new(1e-8, 50));
        assert_eq!(SolverConfig::default().max_iterations, 100);
    }

    #[test]
    fn test_domain_contains() {
        let rates = Domain::above(-1.0);
        assert!(rates.contains(0.0));
        assert!(!rates.contains(-1.0));
        assert!(!rates.contains(f64::NAN));
        assert!(Domain::unbounded().contains(-1e300));
        assert!(!Domain::between(0.0, 1.0).contains(1.0));
    }

    #[test]
    fn test_nudge_inside() {
        let rates = Domain::above(-1.0);
        let x = rates.nudge_inside(-3.0);
        assert!(rates.contains(x));
        assert!(x < -0.999_999);
        assert_eq!(rates.nudge_inside(0.25), 0.25);
    }

    #[test]
    fn test_straddles_zero() {
        assert!(straddles_zero(-1.0, 2.0));
        assert!(straddles_zero(0.0, 2.0));
        assert!(straddles_zero(f64::NEG_INFINITY, 1.0));
        assert!(!straddles_zero(1.0, 2.0));
        assert!(!straddles_zero(f64::NAN, -2.0));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!SolverPhase::Newton { x: 0.1 }.is_terminal());
        assert!(!SolverPhase::Bisecting { lo: 0.0, hi: 1.0 }.is_terminal());
        assert!(SolverPhase::Failed(MathError::NoBracket { guess: 0.0 }).is_terminal());
    }
}
