//! Configuration for the iterative formulas.
//!
//! Everything here has a default matching spreadsheet behaviour, so an
//! empty TOML document is a valid configuration:
//!
//! ```toml
//! actual_actual = "coupon_period"
//! default_guess = 0.1
//!
//! [solver]
//! tolerance = 1e-10
//! max_iterations = 100
//! ```

use serde::{Deserialize, Serialize};

use xlfin_core::daycounts::ActualActualConvention;
use xlfin_core::error::{FinError, FinResult};
use xlfin_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

// =============================================================================
// SOLVER SETTINGS
// =============================================================================

/// Root-finder settings shared by Yield, Irr, XIrr and Rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Convergence tolerance on both |f(x)| and |Δx|.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap per solver phase.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_guess() -> f64 {
    0.1
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverSettings {
    /// Converts to the solver crate's configuration.
    #[must_use]
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

// =============================================================================
// FINANCIAL CONFIGURATION
// =============================================================================

/// Configuration for the financial functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialConfig {
    /// Year-fraction rule for the Actual/Actual basis.
    #[serde(default)]
    pub actual_actual: ActualActualConvention,

    /// Starting rate for Irr, XIrr and Rate when the caller gives none.
    #[serde(default = "default_guess")]
    pub default_guess: f64,

    /// Root-finder settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actual_actual: ActualActualConvention::default(),
            default_guess: default_guess(),
            solver: SolverSettings::default(),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `FinError::InvalidConfig` if the document does not parse or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_str(s: &str) -> FinResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| FinError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> FinResult<String> {
        toml::to_string(self).map_err(|e| FinError::invalid_config(e.to_string()))
    }

    /// Checks the configuration for values the solvers cannot work with.
    pub fn validate(&self) -> FinResult<()> {
        let tolerance = self.solver.tolerance;
        if !(tolerance > 0.0 && tolerance <= 1e-4) {
            return Err(FinError::invalid_config(format!(
                "solver.tolerance must be in (0, 1e-4], got {tolerance}"
            )));
        }

        let iterations = self.solver.max_iterations;
        if iterations == 0 || iterations > 10_000 {
            return Err(FinError::invalid_config(format!(
                "solver.max_iterations must be in 1..=10000, got {iterations}"
            )));
        }

        if !(self.default_guess.is_finite() && self.default_guess > -1.0) {
            return Err(FinError::invalid_config(format!(
                "default_guess must be a finite rate above -1, got {}",
                self.default_guess
            )));
        }

        Ok(())
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Sets the solver iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    /// Sets the Actual/Actual year-fraction rule.
    #[must_use]
    pub fn with_actual_actual(mut self, convention: ActualActualConvention) -> Self {
        self.actual_actual = convention;
        self
    }

    /// Sets the default starting rate.
    #[must_use]
    pub fn with_default_guess(mut self, guess: f64) -> Self {
        self.default_guess = guess;
        self
    }

    /// Solver configuration derived from these settings.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        self.solver.to_solver_config()
    }
}
