use sfm_core::{EquationProblem, Model, Observer};
use sfm_solvers::equation::bisection::{Action, Event};

/// Logs each solver evaluation at `trace` level.
///
/// Failed evaluations are logged at `debug` level. The observer never
/// requests an action.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Trace;

impl<M, P> Observer<Event<'_, M, P>, Action> for Trace
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    fn observe(&mut self, event: &Event<'_, M, P>) -> Option<Action> {
        let x = event.x();
        match (event, event.residual()) {
            (Event::Expand { side, step, .. }, Some(residual)) => {
                tracing::trace!(%side, step = *step, x, residual, "expanding bracket");
            }
            (Event::Left { .. } | Event::Right { .. }, Some(residual)) => {
                tracing::trace!(x, residual, "bracket endpoint");
            }
            (Event::Midpoint { iter, bracket, .. }, Some(residual)) => {
                tracing::trace!(
                    iter = *iter,
                    x,
                    residual,
                    width = bracket.width(),
                    "bisection step"
                );
            }
            (_, None) => {
                if let Err(error) = event.result() {
                    tracing::debug!(x, %error, "evaluation failed");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use sfm_solvers::equation::bisection::{self, Config, ExpandConfig, Status};

    struct Cube;

    impl Model for Cube {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            Ok(x.powi(3))
        }
    }

    struct CubeEquals(f64);

    impl EquationProblem<1> for CubeEquals {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
            Ok([output - self.0])
        }
    }

    #[test]
    fn tracing_does_not_change_the_solution() {
        let problem = CubeEquals(20.0);
        let expand = ExpandConfig::default();
        let config = Config::default();

        let traced = bisection::find_root(&Cube, &problem, 1.0, &expand, &config, Trace)
            .expect("should solve");
        let plain = bisection::find_root_unobserved(&Cube, &problem, 1.0, &expand, &config)
            .expect("should solve");

        assert_eq!(traced.status, Status::Converged);
        assert_eq!(traced.iters, plain.iters);
        assert_relative_eq!(traced.x, plain.x);
    }
}
