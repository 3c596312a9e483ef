use thiserror::Error;

/// Errors that can occur when creating a [`Bracket`] or validating bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
    /// Endpoint residuals share a sign.
    #[error("root not bracketed: f({left}) = {left_residual}, f({right}) = {right_residual}")]
    NotBracketed {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },
}

/// Current bracket bounds and their residuals.
///
/// The endpoint residuals never share a strict sign; either may be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_residual: f64,
    right_residual: f64,
}

impl Bracket {
    /// Creates a validated bracket from ordered bounds and endpoint residuals.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::NotBracketed` if both residuals are strictly
    /// positive or both are strictly negative.
    pub(super) fn new(
        bounds: Bounds,
        left_residual: f64,
        right_residual: f64,
    ) -> Result<Self, BracketError> {
        let same_sign = (left_residual > 0.0 && right_residual > 0.0)
            || (left_residual < 0.0 && right_residual < 0.0);
        if same_sign {
            return Err(BracketError::NotBracketed {
                left: bounds.left,
                right: bounds.right,
                left_residual,
                right_residual,
            });
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_residual,
            right_residual,
        })
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the residuals at the left and right bounds.
    #[must_use]
    pub fn residuals(&self) -> [f64; 2] {
        [self.left_residual, self.right_residual]
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns true if the bracket is strictly narrower than `x_tol`.
    #[must_use]
    pub fn is_x_converged(&self, x_tol: f64) -> bool {
        self.width() < x_tol
    }

    /// Shrinks the bracket to the half that keeps the sign change.
    ///
    /// The right bound moves when `x` and the left bound have residuals of
    /// strictly opposite sign, or when the left bound is an exact root;
    /// otherwise the left bound moves to `x`.
    #[allow(clippy::float_cmp)]
    pub(super) fn shrink(&mut self, x: f64, residual: f64) {
        let flips = self.left_residual == 0.0
            || (self.left_residual < 0.0 && residual > 0.0)
            || (self.left_residual > 0.0 && residual < 0.0);
        if flips {
            self.right = x;
            self.right_residual = residual;
        } else {
            self.left = x;
            self.left_residual = residual;
        }
    }
}

/// Ordered finite bounds for a bisection bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if endpoints are non-finite or zero width.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [left, right] = bracket;

        if !left.is_finite() || !right.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if left == right {
            return Err(BracketError::ZeroWidth);
        }

        if left < right {
            Ok(Self { left, right })
        } else {
            Ok(Self {
                left: right,
                right: left,
            })
        }
    }

    /// Returns the bounds as an array.
    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}
