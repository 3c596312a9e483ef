use sfm_core::Observer;

use crate::traits::CanStopEarly;

/// Stops a solver once a fixed number of evaluations has been observed.
///
/// The first `evaluations` events pass through; the next one requests an
/// early stop, as does every event after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    remaining: usize,
    exhausted: bool,
}

impl Budget {
    /// Creates a budget that allows `evaluations` events before stopping.
    #[must_use]
    pub fn new(evaluations: usize) -> Self {
        Self {
            remaining: evaluations,
            exhausted: false,
        }
    }

    /// Returns true once the budget has requested a stop.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<E, A: CanStopEarly> Observer<E, A> for Budget {
    fn observe(&mut self, _event: &E) -> Option<A> {
        if self.remaining == 0 {
            self.exhausted = true;
            return Some(A::stop_early());
        }
        self.remaining -= 1;
        None
    }
}
