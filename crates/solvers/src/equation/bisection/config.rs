use thiserror::Error;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_tol: f64,
    residual_tol: f64,
}

/// Configuration for bracket expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandConfig {
    max_steps: usize,
    factor: f64,
}

/// Errors that can occur when validating a solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_tol must be finite and non-negative")]
    XTol,

    #[error("residual_tol must be finite and non-negative")]
    ResidualTol,

    #[error("expansion factor must be finite and greater than one")]
    Factor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_tol: 1e-6,
            residual_tol: 1e-6,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(max_iters: usize, x_tol: f64, residual_tol: f64) -> Result<Self, ConfigError> {
        if !x_tol.is_finite() || x_tol < 0.0 {
            return Err(ConfigError::XTol);
        }
        if !residual_tol.is_finite() || residual_tol < 0.0 {
            return Err(ConfigError::ResidualTol);
        }

        Ok(Self {
            max_iters,
            x_tol,
            residual_tol,
        })
    }

    /// Creates a config using one tolerance for both the bracket width and
    /// the residual.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite.
    pub fn with_tolerance(max_iters: usize, tolerance: f64) -> Result<Self, ConfigError> {
        Self::new(max_iters, tolerance, tolerance)
    }

    /// Returns the maximum number of midpoint iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the bracket width below which the solver has converged.
    #[must_use]
    pub fn x_tol(&self) -> f64 {
        self.x_tol
    }

    /// Returns the residual magnitude below which the solver has converged.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            max_steps: 64,
            factor: 2.0,
        }
    }
}

impl ExpandConfig {
    /// Creates a new expansion config.
    ///
    /// `max_steps` bounds the number of expansion steps on each side.
    ///
    /// # Errors
    ///
    /// Returns an error if `factor` is not finite or not greater than one.
    pub fn new(max_steps: usize, factor: f64) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(ConfigError::Factor);
        }
        Ok(Self { max_steps, factor })
    }

    /// Returns the maximum number of expansion steps per side.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the factor each bound is divided or multiplied by per step.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_solver() {
        let config = Config::default();
        assert_eq!(config.max_iters(), 100);
        assert!((config.x_tol() - 1e-6).abs() < f64::EPSILON);
        assert!((config.residual_tol() - 1e-6).abs() < f64::EPSILON);

        let expand = ExpandConfig::default();
        assert_eq!(expand.max_steps(), 64);
        assert!((expand.factor() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(10, -1.0, 1e-6), Err(ConfigError::XTol));
        assert_eq!(Config::new(10, 1e-6, f64::NAN), Err(ConfigError::ResidualTol));
        assert_eq!(
            Config::with_tolerance(10, f64::INFINITY),
            Err(ConfigError::XTol)
        );
        assert!(Config::new(0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_bad_factor() {
        assert_eq!(ExpandConfig::new(8, 1.0), Err(ConfigError::Factor));
        assert_eq!(ExpandConfig::new(8, 0.5), Err(ConfigError::Factor));
        assert_eq!(ExpandConfig::new(8, f64::NAN), Err(ConfigError::Factor));
        assert!(ExpandConfig::new(8, 1.5).is_ok());
    }
}
