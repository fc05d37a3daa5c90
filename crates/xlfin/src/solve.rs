//! Bridge from the formula crate to the root finder.

use xlfin_core::error::{FinError, FinResult};
use xlfin_math::error::MathError;
use xlfin_math::solvers::{hybrid, hybrid_with_derivative, Domain};

use crate::config::FinancialConfig;

/// Maps a solver failure onto `FinError::NoSolution`, naming the formula.
pub(crate) fn no_solution(what: &str, err: &MathError) -> FinError {
    FinError::no_solution(format!("{what}: {err}"))
}

/// Solves `f(x) = 0` inside `domain` with a numerical derivative.
pub(crate) fn solve<F>(
    what: &str,
    f: F,
    guess: f64,
    domain: Domain,
    config: &FinancialConfig,
) -> FinResult<f64>
where
    F: Fn(f64) -> f64,
{
    let result = hybrid(f, guess, domain, &config.solver_config())
        .map_err(|e| no_solution(what, &e))?;
    log::debug!(
        "{what}: root {} after {} iterations (residual {:.3e})",
        result.root,
        result.iterations,
        result.residual
    );
    Ok(result.root)
}

/// Solves `f(x) = 0` inside `domain` with an analytical derivative.
pub(crate) fn solve_with_derivative<F, DF>(
    what: &str,
    f: F,
    df: DF,
    guess: f64,
    domain: Domain,
    config: &FinancialConfig,
) -> FinResult<f64>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let result = hybrid_with_derivative(f, df, guess, domain, &config.solver_config())
        .map_err(|e| no_solution(what, &e))?;
    log::debug!(
        "{what}: root {} after {} iterations (residual {:.3e})",
        result.root,
        result.iterations,
        result.residual
    );
    Ok(result.root)
}

/// Rejects a series unless it holds at least one positive and one negative value.
pub(crate) fn require_sign_change(what: &str, values: &[f64]) -> FinResult<()> {
    let has_positive = values.iter().any(|v| *v > 0.0);
    let has_negative = values.iter().any(|v| *v < 0.0);
    if has_positive && has_negative {
        Ok(())
    } else {
        Err(FinError::no_solution(format!(
            "{what}: cash flows need at least one positive and one negative value"
        )))
    }
}
