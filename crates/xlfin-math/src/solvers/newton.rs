//! Newton-Raphson root finding.
//!
//! [`step`] is the single Newton update shared by the standalone solvers
//! here and by the Newton phase of [`hybrid`](super::hybrid). The callers
//! differ only in what they do when a step cannot be taken.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Relative step for central-difference derivatives.
const DERIVATIVE_STEP: f64 = 1e-7;

/// Outcome of one Newton update from an iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// `|f(x)|` or the update itself fell below tolerance.
    Converged(SolverResult),
    /// The next iterate.
    Advance(f64),
    /// `f(x)` is NaN or infinite.
    NonFiniteValue,
    /// `f'(x)` is not finite or too small to divide by.
    FlatDerivative(f64),
}

/// Takes one Newton update `x - f(x) / f'(x)` from `x`.
///
/// `iteration` is the zero-based index of this update, used for the
/// iteration count of a converged result.
pub(crate) fn step<F, DF>(f: &F, df: &DF, x: f64, iteration: u32, tolerance: f64) -> Step
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let fx = f(x);
    if !fx.is_finite() {
        return Step::NonFiniteValue;
    }
    if fx.abs() < tolerance {
        return Step::Converged(SolverResult {
            root: x,
            iterations: iteration,
            residual: fx,
        });
    }

    let dfx = df(x);
    if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
        return Step::FlatDerivative(dfx);
    }

    let next = x - fx / dfx;
    log::trace!("newton iteration {iteration}: x={next:.12} f={fx:.3e}");

    if (next - x).abs() < tolerance {
        Step::Converged(SolverResult {
            root: next,
            iterations: iteration + 1,
            residual: f(next),
        })
    } else {
        Step::Advance(next)
    }
}

/// Newton-Raphson with an analytical derivative.
///
/// Unlike [`hybrid`](super::hybrid) there is no fallback: a non-finite value,
/// a vanishing derivative or an exhausted iteration cap is an error.
///
/// # Example
///
/// ```rust
/// use xlfin_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        match step(&f, &df, x, iteration, config.tolerance) {
            Step::Converged(result) => return Ok(result),
            Step::Advance(next) => x = next,
            Step::NonFiniteValue => {
                return Err(MathError::invalid_input(format!("f({x}) is not finite")));
            }
            Step::FlatDerivative(value) => return Err(MathError::DivisionByZero { value }),
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

/// Newton-Raphson with a central-difference derivative.
///
/// The difference step scales with `max(1, |x|)` so large arguments keep a
/// meaningful number of significant digits.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    newton_raphson(&f, |x| central_difference(&f, x), initial_guess, config)
}

/// Central-difference estimate of `f'(x)`.
pub(crate) fn central_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = DERIVATIVE_STEP * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}
