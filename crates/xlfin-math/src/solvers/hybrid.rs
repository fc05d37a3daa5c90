//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson drives the search; bisection over an automatically
//! discovered bracket takes over when Newton cannot continue.

use crate::error::{MathError, MathResult};
use crate::solvers::newton::{central_difference, step, Step};
use crate::solvers::{bisection, straddles_zero, Domain, SolverConfig, SolverPhase, SolverResult};

/// First expansion step of the bracket search, relative to `max(1, |guess|)`.
const INITIAL_BRACKET_STEP: f64 = 0.1;

/// Bracket search stops once the expansion step exceeds this.
const MAX_BRACKET_STEP: f64 = 1e6;

/// Hybrid root finder with a central-difference derivative.
///
/// # Strategy
///
/// 1. Newton-Raphson from `initial_guess`
/// 2. If the derivative is near zero or not finite, a value is not finite,
///    the next iterate leaves `domain`, or the iteration cap is reached,
///    search for a sign change around the last usable iterate
/// 3. Bisect the bracket
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for Newton iteration
/// * `domain` - Open interval the iterates must stay inside
/// * `config` - Solver configuration; the iteration cap applies per phase
///
/// # Example
///
/// ```rust
/// use xlfin_math::solvers::{hybrid, Domain, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = hybrid(f, 1.5, Domain::unbounded(), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-9);
/// ```
pub fn hybrid<F>(
    f: F,
    initial_guess: f64,
    domain: Domain,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    hybrid_with_derivative(&f, |x| central_difference(&f, x), initial_guess, domain, config)
}

/// Hybrid root finder with an analytical derivative.
///
/// Same strategy as [`hybrid`].
pub fn hybrid_with_derivative<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    domain: Domain,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !initial_guess.is_finite() {
        return Err(MathError::invalid_input(format!(
            "initial guess {initial_guess} is not finite"
        )));
    }
    if !(config.tolerance > 0.0) || config.max_iterations == 0 {
        return Err(MathError::invalid_input(
            "tolerance must be positive and max_iterations non-zero",
        ));
    }

    let mut phase = SolverPhase::Newton {
        x: domain.nudge_inside(initial_guess),
    };

    loop {
        phase = match phase {
            SolverPhase::Newton { x } => newton_phase(&f, &df, x, domain, config),
            SolverPhase::Bisecting { lo, hi } => match bisection(&f, lo, hi, config) {
                Ok(result) => SolverPhase::Converged(result),
                Err(err) => SolverPhase::Failed(err),
            },
            SolverPhase::Converged(result) => return Ok(result),
            SolverPhase::Failed(err) => return Err(err),
        };
    }
}

fn newton_phase<F, DF>(f: &F, df: &DF, start: f64, domain: Domain, config: &SolverConfig) -> SolverPhase
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = start;
    // Last iterate with a finite objective value
    let mut anchor = start;

    for iteration in 0..config.max_iterations {
        let next = match step(f, df, x, iteration, config.tolerance) {
            Step::Converged(result) if domain.contains(result.root) => {
                return SolverPhase::Converged(result);
            }
            Step::Converged(result) => result.root,
            Step::Advance(next) => next,
            Step::NonFiniteValue => {
                log::debug!("newton: f({x}) is not finite, falling back to bisection");
                return fall_back(f, anchor, domain);
            }
            Step::FlatDerivative(dfx) => {
                log::debug!("newton: derivative {dfx:.3e} at {x} unusable, falling back to bisection");
                return fall_back(f, x, domain);
            }
        };

        anchor = x;
        if !domain.contains(next) {
            log::debug!("newton: iterate {next} left the domain, falling back to bisection");
            return fall_back(f, x, domain);
        }
        x = next;
    }

    log::debug!(
        "newton: no convergence in {} iterations, falling back to bisection",
        config.max_iterations
    );
    fall_back(f, anchor, domain)
}

fn fall_back<F>(f: &F, anchor: f64, domain: Domain) -> SolverPhase
where
    F: Fn(f64) -> f64,
{
    match find_bracket(f, anchor, domain) {
        Some((lo, hi)) => SolverPhase::Bisecting { lo, hi },
        None => SolverPhase::Failed(MathError::NoBracket { guess: anchor }),
    }
}

/// Searches outward from `guess` for an interval over which `f` changes sign.
///
/// The search steps left and right with a doubling step, never leaving
/// `domain`, and returns the first pair of adjacent sample points whose
/// values straddle zero.
pub fn find_bracket<F>(f: &F, guess: f64, domain: Domain) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let start = domain.nudge_inside(guess);
    let f_start = f(start);
    if f_start == 0.0 {
        return Some((start, start));
    }

    let mut left = (start, f_start);
    let mut right = (start, f_start);
    let mut delta = INITIAL_BRACKET_STEP * start.abs().max(1.0);

    while delta <= MAX_BRACKET_STEP {
        let mut moved = false;

        let next = domain.nudge_inside(left.0 - delta);
        if next < left.0 {
            moved = true;
            let value = f(next);
            if straddles_zero(value, left.1) {
                log::debug!("bracket found: [{next}, {}]", left.0);
                return Some((next, left.0));
            }
            if !value.is_nan() {
                left = (next, value);
            }
        }

        let next = domain.nudge_inside(right.0 + delta);
        if next > right.0 {
            moved = true;
            let value = f(next);
            if straddles_zero(right.1, value) {
                log::debug!("bracket found: [{}, {next}]", right.0);
                return Some((right.0, next));
            }
            if !value.is_nan() {
                right = (next, value);
            }
        }

        if !moved {
            break;
        }
        delta *= 2.0;
    }

    None
}
