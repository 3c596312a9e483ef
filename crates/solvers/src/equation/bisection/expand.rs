use std::fmt;

use sfm_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use super::{Action, Error, Event, ExpandConfig, accept};

/// A bound of the bracket being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Divided by the factor while its residual is positive.
    Lower,
    /// Multiplied by the factor while its residual is negative.
    Upper,
}

impl Side {
    fn keeps_going(self, residual: f64) -> bool {
        match self {
            Side::Lower => residual > 0.0,
            Side::Upper => residual < 0.0,
        }
    }

    fn advance(self, x: f64, factor: f64) -> f64 {
        match self {
            Side::Lower => x / factor,
            Side::Upper => x * factor,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Lower => f.write_str("lower"),
            Side::Upper => f.write_str("upper"),
        }
    }
}

/// The outcome of a successful bracket expansion.
#[derive(Debug, Clone)]
pub enum Expansion<I, O> {
    /// Bounds `[lower, upper]` whose residuals do not share a sign.
    Bracket([f64; 2]),
    /// The initial guess has a residual of exactly zero.
    Root(Evaluation<I, O, 1>),
}

#[allow(clippy::float_cmp)]
pub(super) fn expand<M, P, Obs>(
    model: &M,
    problem: &P,
    initial_guess: f64,
    config: &ExpandConfig,
    observer: &mut Obs,
) -> Result<Expansion<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    if !initial_guess.is_finite() || initial_guess <= 0.0 {
        return Err(Error::InvalidGuess {
            value: initial_guess,
        });
    }

    let lower = walk(model, problem, initial_guess, Side::Lower, config, observer)?;
    let upper = walk(model, problem, initial_guess, Side::Upper, config, observer)?;

    if lower.x[0] == upper.x[0] {
        return Ok(Expansion::Root(upper));
    }

    Ok(Expansion::Bracket([lower.x[0], upper.x[0]]))
}

/// Moves one bound away from the guess until its residual stops pointing
/// further out, returning the evaluation at the final bound.
///
/// The walk also ends when the next bound would underflow to zero or
/// overflow to infinity.
fn walk<M, P, Obs>(
    model: &M,
    problem: &P,
    initial_guess: f64,
    side: Side,
    config: &ExpandConfig,
    observer: &mut Obs,
) -> Result<Evaluation<M::Input, M::Output, 1>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let mut x = initial_guess;
    let mut step = 0;

    loop {
        let result = evaluate(model, problem, [x]);
        let action = observer.observe(&Event::Expand {
            side,
            step,
            x,
            result: &result,
        });
        let eval = accept(x, result)?;

        if action == Some(Action::StopEarly) {
            return Err(Error::StoppedByObserver);
        }

        if !side.keeps_going(eval.residuals[0]) {
            return Ok(eval);
        }

        if step == config.max_steps() {
            return Err(Error::BracketNotFound {
                side,
                steps: step,
                x,
            });
        }

        let next = side.advance(x, config.factor());
        if next <= 0.0 || !next.is_finite() {
            return Err(Error::BracketNotFound {
                side,
                steps: step,
                x,
            });
        }
        x = next;
        step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// Model whose output is `x - root`, increasing in `x`.
    struct Shifted {
        root: f64,
    }

    impl Model for Shifted {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            Ok(x - self.root)
        }
    }

    /// Model with a constant output.
    struct Constant(f64);

    impl Model for Constant {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, _x: &f64) -> Result<f64, Self::Error> {
            Ok(self.0)
        }
    }

    struct OutputIsResidual;

    impl EquationProblem<1> for OutputIsResidual {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
            Ok([*output])
        }
    }

    fn bracket_of<I, O>(expansion: Expansion<I, O>) -> [f64; 2] {
        match expansion {
            Expansion::Bracket(bracket) => bracket,
            Expansion::Root(_) => panic!("expected a bracket"),
        }
    }

    #[test]
    fn doubles_upper_bound_for_large_root() {
        let model = Shifted { root: 3.0 };
        let config = ExpandConfig::default();
        let expansion =
            expand(&model, &OutputIsResidual, 1.0, &config, &mut ()).expect("should find bracket");

        let [lower, upper] = bracket_of(expansion);
        assert_relative_eq!(lower, 1.0);
        assert_relative_eq!(upper, 4.0);
    }

    #[test]
    fn halves_lower_bound_for_small_root() {
        let model = Shifted { root: 0.1 };
        let config = ExpandConfig::default();
        let expansion =
            expand(&model, &OutputIsResidual, 1.0, &config, &mut ()).expect("should find bracket");

        let [lower, upper] = bracket_of(expansion);
        assert_relative_eq!(lower, 0.0625);
        assert_relative_eq!(upper, 1.0);
    }

    #[test]
    fn exact_root_at_guess_is_reported() {
        let model = Shifted { root: 1.0 };
        let config = ExpandConfig::default();
        let expansion =
            expand(&model, &OutputIsResidual, 1.0, &config, &mut ()).expect("should succeed");

        match expansion {
            Expansion::Root(eval) => assert_relative_eq!(eval.x[0], 1.0),
            Expansion::Bracket(b) => panic!("unexpected bracket {b:?}"),
        }
    }

    #[test]
    fn always_positive_exhausts_lower_side() {
        let config = ExpandConfig::new(10, 2.0).unwrap();
        let result = expand(&Constant(1.0), &OutputIsResidual, 1.0, &config, &mut ());

        match result {
            Err(Error::BracketNotFound { side, steps, x }) => {
                assert_eq!(side, Side::Lower);
                assert_eq!(steps, 10);
                assert_relative_eq!(x, 1.0 / 1024.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn always_negative_exhausts_upper_side() {
        let result = expand(
            &Constant(-1.0),
            &OutputIsResidual,
            1.0,
            &ExpandConfig::default(),
            &mut (),
        );

        match result {
            Err(Error::BracketNotFound { side, steps, .. }) => {
                assert_eq!(side, Side::Upper);
                assert_eq!(steps, 64);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lower_side_stops_before_underflow() {
        let config = ExpandConfig::new(2000, 2.0).unwrap();
        let result = expand(&Constant(1.0), &OutputIsResidual, 1.0, &config, &mut ());

        match result {
            Err(Error::BracketNotFound { side, steps, x }) => {
                assert_eq!(side, Side::Lower);
                assert_eq!(steps, 1074);
                assert!(x > 0.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn upper_side_stops_before_overflow() {
        let config = ExpandConfig::new(2000, 2.0).unwrap();
        let result = expand(&Constant(-1.0), &OutputIsResidual, 1.0, &config, &mut ());

        match result {
            Err(Error::BracketNotFound { side, steps, x }) => {
                assert_eq!(side, Side::Upper);
                assert_eq!(steps, 1023);
                assert!(x.is_finite());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_guess() {
        let model = Shifted { root: 1.0 };
        let config = ExpandConfig::default();
        for guess in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = expand(&model, &OutputIsResidual, guess, &config, &mut ());
            assert!(matches!(result, Err(Error::InvalidGuess { .. })));
        }
    }

    #[test]
    fn observer_sees_each_step_and_can_stop() {
        let model = Shifted { root: 5.0 };
        let mut seen = Vec::new();
        let mut observer = |event: &Event<'_, Shifted, OutputIsResidual>| {
            if let Event::Expand { side, step, x, .. } = event {
                seen.push((*side, *step, *x));
            }
            None
        };

        let config = ExpandConfig::default();
        let expansion = expand(&model, &OutputIsResidual, 1.0, &config, &mut observer)
            .expect("should find bracket");
        assert_eq!(bracket_of(expansion), [1.0, 8.0]);
        assert_eq!(
            seen,
            vec![
                (Side::Lower, 0, 1.0),
                (Side::Upper, 0, 1.0),
                (Side::Upper, 1, 2.0),
                (Side::Upper, 2, 4.0),
                (Side::Upper, 3, 8.0),
            ]
        );

        let mut stopper = |_: &Event<'_, Shifted, OutputIsResidual>| Some(Action::StopEarly);
        let result = expand(&model, &OutputIsResidual, 1.0, &config, &mut stopper);
        assert!(matches!(result, Err(Error::StoppedByObserver)));
    }
}
