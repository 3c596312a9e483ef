use sfm_core::{EquationProblem, Model};

use crate::equation::EvaluateResult;

use super::{Bracket, Side};

/// Event emitted by the bisection solver for each evaluation.
pub enum Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Bracket expansion step.
    Expand {
        /// The bound being moved.
        side: Side,
        /// Steps taken on this side so far (0 is the initial guess).
        step: usize,
        /// The x value that was evaluated.
        x: f64,
        /// The result of the evaluation.
        result: &'a EvaluateResult<M, P, 1>,
    },
    /// Left bracket endpoint evaluation.
    Left {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },
    /// Right bracket endpoint evaluation.
    Right {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },
    /// Midpoint evaluation with a validated bracket.
    Midpoint {
        /// Iteration counter (1-based).
        iter: usize,
        x: f64,
        /// Bracket the midpoint was taken from.
        bracket: &'a Bracket,
        result: &'a EvaluateResult<M, P, 1>,
    },
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Returns the evaluated x value.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Event::Expand { x, .. }
            | Event::Left { x, .. }
            | Event::Right { x, .. }
            | Event::Midpoint { x, .. } => *x,
        }
    }

    /// Returns the evaluation result.
    pub fn result(&self) -> &'a EvaluateResult<M, P, 1> {
        match self {
            Event::Expand { result, .. }
            | Event::Left { result, .. }
            | Event::Right { result, .. }
            | Event::Midpoint { result, .. } => *result,
        }
    }

    /// Returns the residual, or `None` if the evaluation failed.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.result().as_ref().ok().map(|eval| eval.residuals[0])
    }
}
