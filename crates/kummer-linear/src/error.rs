//! Error types for formal sum arithmetic.

use thiserror::Error;

use crate::basic::Coeff;

/// Errors from dividing a formal sum by an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DivisionError {
    /// Some coefficient is not a multiple of the divisor.
    #[error("coefficient {coeff} is not divisible by {divisor}")]
    Inexact {
        /// The offending coefficient.
        coeff: Coeff,
        /// The requested divisor.
        divisor: Coeff,
    },

    /// The quotient does not fit in a coefficient.
    #[error("quotient of {coeff} by {divisor} overflows")]
    Overflow {
        /// The offending coefficient.
        coeff: Coeff,
        /// The requested divisor.
        divisor: Coeff,
    },

    /// The divisor is zero.
    #[error("division of a formal sum by zero")]
    ByZero,
}
