//! Bisection root finding with automatic bracket expansion.
//!
//! # Algorithm
//!
//! Bisection keeps an interval `[left, right]` whose endpoint residuals have
//! opposite signs, evaluates the midpoint, and keeps the half that still
//! contains the sign change. For a continuous residual it always converges.
//!
//! Iteration stops as soon as **either** the midpoint residual satisfies
//! `|r| < residual_tol` **or** the current bracket is narrower than `x_tol`.
//! The width test alone can end the search while the residual is still large,
//! for example when the residual jumps across zero.
//!
//! Tolerances apply to midpoints only. An endpoint is returned directly, with
//! zero iterations, only when its residual is exactly zero; otherwise the
//! solution is always a midpoint. An exact zero at a midpoint also converges,
//! even when `residual_tol` is zero.
//!
//! # Finding a bracket
//!
//! [`expand_bracket`] searches a positive domain for a sign change, starting
//! both ends at an initial guess. The lower end shrinks (divides by the
//! expansion factor) while its residual is positive, then the upper end grows
//! (multiplies by the factor) while its residual is negative. This assumes the
//! residual increases with `x`. Each side takes a bounded number of steps.
//!
//! [`find_root`] runs the expansion and then bisection with one observer.
//!
//! # Observer Events
//!
//! Every evaluation emits one [`Event`]:
//!
//! - [`Event::Expand`] — a bracket expansion step
//! - [`Event::Left`] / [`Event::Right`] — the bracket endpoints
//! - [`Event::Midpoint`] — one bisection iteration
//!
//! Observers can return [`Action::StopEarly`]. During bisection the solver
//! then returns the best evaluation seen so far with
//! [`Status::StoppedByObserver`]. During expansion there is no bracket to
//! report, so the solver fails with [`Error::StoppedByObserver`].

mod action;
mod best;
mod bracket;
mod config;
mod error;
mod event;
mod expand;
mod solution;


pub use action::Action;
pub use bracket::{Bracket, BracketError};
pub use config::{Config, ConfigError, ExpandConfig};
pub use error::Error;
pub use event::Event;
pub use expand::{Expansion, Side};
pub use solution::{Solution, Status};

use std::error::Error as StdError;

use sfm_core::{EquationProblem, Model, Observer};

use crate::equation::{EvalError, Evaluation, evaluate};

use best::Best;
use bracket::Bounds;
use expand::expand;

/// Finds a root of the equation inside `bracket` using bisection.
///
/// The bracket may be given in either order. Its endpoint residuals must not
/// share a sign. An endpoint whose residual is exactly zero is returned with
/// zero iterations.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if the iteration limit is reached without convergence, or if the
/// model or problem fails during evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    bisect(model, problem, bracket, config, &mut observer)
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Searches outward from `initial_guess` for a bracket containing a root.
///
/// See the [module docs](self) for the expansion rule.
///
/// # Errors
///
/// Returns an error if the guess is not finite and positive, if either side
/// runs out of expansion steps, if the observer stops the search, or if the
/// model or problem fails during evaluation.
pub fn expand_bracket<M, P, Obs>(
    model: &M,
    problem: &P,
    initial_guess: f64,
    config: &ExpandConfig,
    mut observer: Obs,
) -> Result<Expansion<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    expand(model, problem, initial_guess, config, &mut observer)
}

/// Expands a bracket from `initial_guess`, then bisects it.
///
/// If the initial guess is an exact root it is returned with zero iterations.
///
/// # Errors
///
/// Returns any error from [`expand_bracket`] or [`solve`].
pub fn find_root<M, P, Obs>(
    model: &M,
    problem: &P,
    initial_guess: f64,
    expand_config: &ExpandConfig,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    match expand(model, problem, initial_guess, expand_config, &mut observer)? {
        Expansion::Root(eval) => Ok(Solution::from_eval(eval, Status::Converged, 0)),
        Expansion::Bracket(bracket) => bisect(model, problem, bracket, config, &mut observer),
    }
}

/// Runs [`find_root`] without observation.
///
/// # Errors
///
/// See [`find_root`].
pub fn find_root_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial_guess: f64,
    expand_config: &ExpandConfig,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    find_root(model, problem, initial_guess, expand_config, config, ())
}

#[allow(clippy::float_cmp)]
fn bisect<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    observer: &mut Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();
    let mut best = Best::empty();

    let result = evaluate(model, problem, [left]);
    let action = observer.observe(&Event::Left {
        x: left,
        result: &result,
    });
    let left_eval = accept(left, result)?;
    let left_residual = left_eval.residuals[0];
    best.update(left_eval);
    if action == Some(Action::StopEarly) {
        return best.finish(Status::StoppedByObserver, 0);
    }

    let result = evaluate(model, problem, [right]);
    let action = observer.observe(&Event::Right {
        x: right,
        result: &result,
    });
    let right_eval = accept(right, result)?;
    let right_residual = right_eval.residuals[0];
    best.update(right_eval);
    if action == Some(Action::StopEarly) {
        return best.finish(Status::StoppedByObserver, 0);
    }

    let mut bracket = Bracket::new(bounds, left_residual, right_residual)?;

    if best.is_exact_root() {
        return best.finish(Status::Converged, 0);
    }

    for iter in 1..=config.max_iters() {
        let x = bracket.midpoint();
        let result = evaluate(model, problem, [x]);
        let action = observer.observe(&Event::Midpoint {
            iter,
            x,
            bracket: &bracket,
            result: &result,
        });
        let eval = accept(x, result)?;
        let residual = eval.residuals[0];

        if action == Some(Action::StopEarly) {
            best.update(eval);
            return best.finish(Status::StoppedByObserver, iter);
        }

        if residual == 0.0
            || residual.abs() < config.residual_tol()
            || bracket.is_x_converged(config.x_tol())
        {
            return Ok(Solution::from_eval(eval, Status::Converged, iter));
        }

        bracket.shrink(x, residual);
        best.update(eval);
    }

    Err(Error::DidNotConverge {
        iters: config.max_iters(),
        bracket: bracket.as_array(),
    })
}

/// Converts an evaluation result into a usable evaluation.
///
/// Evaluation failures and non-finite residuals are both terminal.
fn accept<I, O, ME, PE>(
    x: f64,
    result: Result<Evaluation<I, O, 1>, EvalError<ME, PE>>,
) -> Result<Evaluation<I, O, 1>, Error>
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    let eval = result?;
    let residual = eval.residuals[0];
    if residual.is_finite() {
        Ok(eval)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}
