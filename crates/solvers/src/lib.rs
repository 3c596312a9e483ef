//! Numerical solvers built on the [`sfm_core`] problem traits.
//!
//! - [`equation`] — root finding for [`EquationProblem`]s
//!
//! [`EquationProblem`]: sfm_core::EquationProblem

pub mod equation;
