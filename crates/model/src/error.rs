use std::fmt;

use sfm_core::constraint::{Constrained, Constraint, ConstraintError};
use thiserror::Error;

/// A model quantity, used to label domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    LaborAllocationRatio,
    ManufacturingLabor,
    ManufacturingOutput,
    AgricultureOutput,
    Income,
    ManufacturingDemand,
    AgricultureDemand,
    RelativeSupply,
    RelativeDemand,
    Wage,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::LaborAllocationRatio => "labor allocation ratio",
            Quantity::ManufacturingLabor => "labor in manufacturing",
            Quantity::ManufacturingOutput => "manufacturing output",
            Quantity::AgricultureOutput => "agriculture output",
            Quantity::Income => "total income",
            Quantity::ManufacturingDemand => "demand for manufacturing",
            Quantity::AgricultureDemand => "demand for agriculture",
            Quantity::RelativeSupply => "relative world supply",
            Quantity::RelativeDemand => "relative world demand",
            Quantity::Wage => "wage",
        };
        f.write_str(name)
    }
}

/// A model quantity is undefined at the evaluated price.
///
/// These errors are terminal for the evaluation that raised them. They are
/// never replaced by a default value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    #[error("division by zero computing {quantity} at relative price {price}")]
    DivisionByZero { quantity: Quantity, price: f64 },

    #[error("{quantity} is not finite ({value}) at relative price {price}")]
    NonFinite {
        quantity: Quantity,
        value: f64,
        price: f64,
    },
}

impl DomainError {
    /// Returns the quantity that could not be computed.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        match self {
            DomainError::DivisionByZero { quantity, .. } | DomainError::NonFinite { quantity, .. } => {
                *quantity
            }
        }
    }

    /// Returns the relative price at which the error occurred.
    #[must_use]
    pub fn price(&self) -> f64 {
        match self {
            DomainError::DivisionByZero { price, .. } | DomainError::NonFinite { price, .. } => *price,
        }
    }
}

/// Divides `numerator` by `denominator`, labeling failures with `quantity`.
pub(crate) fn checked_div(
    quantity: Quantity,
    numerator: f64,
    denominator: f64,
    price: f64,
) -> Result<f64, DomainError> {
    if denominator == 0.0 {
        return Err(DomainError::DivisionByZero { quantity, price });
    }
    finite(quantity, numerator / denominator, price)
}

/// Passes `value` through if it is finite.
pub(crate) fn finite(quantity: Quantity, value: f64, price: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite {
            quantity,
            value,
            price,
        })
    }
}

/// Why a parameter value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidValue {
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error("value must be finite")]
    Infinite,
}

/// A model parameter failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {parameter}: {source}")]
pub struct ParameterError {
    pub parameter: &'static str,
    #[source]
    pub source: InvalidValue,
}

impl ParameterError {
    /// Checks that `value` is finite and satisfies `C`.
    pub(crate) fn check<C: Constraint<f64>>(
        parameter: &'static str,
        value: f64,
    ) -> Result<Constrained<f64, C>, Self> {
        if value.is_infinite() {
            return Err(Self {
                parameter,
                source: InvalidValue::Infinite,
            });
        }
        Constrained::new(value).map_err(|err| Self {
            parameter,
            source: err.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_reported() {
        let err = checked_div(Quantity::Wage, 1.0, 0.0, 0.5).unwrap_err();
        assert_eq!(
            err,
            DomainError::DivisionByZero {
                quantity: Quantity::Wage,
                price: 0.5
            }
        );
        assert_eq!(err.to_string(), "division by zero computing wage at relative price 0.5");
    }

    #[test]
    fn overflow_is_not_finite() {
        let err = checked_div(Quantity::RelativeSupply, f64::MAX, 1e-10, 2.0).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NonFinite {
                quantity: Quantity::RelativeSupply,
                ..
            }
        ));
        assert_eq!(err.quantity(), Quantity::RelativeSupply);
        assert!((err.price() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parameters_must_be_finite() {
        use sfm_core::constraint::StrictlyPositive;

        let err = ParameterError::check::<StrictlyPositive>("capital", f64::INFINITY).unwrap_err();
        assert_eq!(err.source, InvalidValue::Infinite);
        assert_eq!(err.to_string(), "invalid capital: value must be finite");

        let err = ParameterError::check::<StrictlyPositive>("land", 0.0).unwrap_err();
        assert_eq!(err.source, InvalidValue::Constraint(ConstraintError::Zero));

        let ok = ParameterError::check::<StrictlyPositive>("labor", 2.5).unwrap();
        assert!((ok.into_inner() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(finite(Quantity::Income, f64::NAN, 1.0).is_err());
        assert!(finite(Quantity::Income, 3.5, 1.0).is_ok());
    }
}
