use std::cmp::Ordering;

use num_traits::{One, Zero};

use super::{Constrained, Constraint, ConstraintError};

/// Types with a zero and a one to bound a unit interval.
pub trait UnitBounds: PartialOrd + Zero + One {}

impl UnitBounds for f32 {}
impl UnitBounds for f64 {}

/// Marker type enforcing that a value lies in the open unit interval: `0 < x < 1`.
///
/// Cobb-Douglas cost and expenditure shares use this constraint. Both ends are
/// excluded: a share of zero or one would leave a sector without a factor or a
/// good without demand.
///
/// # Examples
///
/// ```
/// use sfm_core::constraint::OpenUnitInterval;
///
/// let beta = OpenUnitInterval::new(0.4).unwrap();
/// assert_eq!(beta.into_inner(), 0.4);
///
/// assert!(OpenUnitInterval::new(0.0).is_err());
/// assert!(OpenUnitInterval::new(1.0).is_err());
/// assert!(OpenUnitInterval::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenUnitInterval;

impl OpenUnitInterval {
    /// Constructs `Constrained<T, OpenUnitInterval>` if `0 < value < 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than or equal to one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, OpenUnitInterval>, ConstraintError> {
        Constrained::<T, OpenUnitInterval>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for OpenUnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater | Ordering::Equal)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
