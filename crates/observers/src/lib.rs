//! Reusable observers for the solvers in [`sfm_solvers`].
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasResidual`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Trace`] — logs every solver evaluation through `tracing`
//! - [`Budget`] — stops a solve after a fixed number of evaluations
//!
//! [`HasResidual`]: traits::HasResidual
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod budget;
mod trace;

pub use budget::Budget;
pub use trace::Trace;
