/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early.
    ///
    /// During bisection the best solution found so far is returned.
    /// During bracket expansion the solve fails, since no bracket exists yet.
    StopEarly,
}
