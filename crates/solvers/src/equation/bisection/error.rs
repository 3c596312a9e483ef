use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

use super::{ConfigError, Side, bracket::BracketError};

/// Errors that can occur during bracket expansion or bisection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("initial guess must be finite and positive, got {value}")]
    InvalidGuess { value: f64 },

    #[error("bracket not found: {side} bound reached {x} after {steps} steps without a sign change")]
    BracketNotFound { side: Side, steps: usize, x: f64 },

    #[error("did not converge in {iters} iterations, last bracket [{}, {}]", .bracket[0], .bracket[1])]
    DidNotConverge { iters: usize, bracket: [f64; 2] },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("stopped by observer before a bracket was found")]
    StoppedByObserver,

    #[error("no successful evaluations")]
    NoSuccessfulEvaluation,

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
        }
    }
}
