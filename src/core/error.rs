//! Errors raised by the ruler component.

use thiserror::Error;

/// Everything that can go wrong when building or driving a [`Ruler`].
///
/// [`Ruler`]: super::ruler::Ruler
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RulerError {
    /// A requested value does not lie on the scale.
    #[error("the value {value} is out of range: [{min:.1}, {max:.1}]")]
    ValueOutOfRange { value: f64, min: f64, max: f64 },

    /// The configured start of the scale is not below its end, or the range
    /// is too large to represent in tenths.
    #[error("invalid scale range: [{min}, {max}]")]
    InvalidRange { min: i64, max: i64 },

    /// The configured initial value is not on the scale.
    #[error("initial value {value} is outside the scale [{min}, {max}]")]
    InitialValueOutOfRange { value: f64, min: i64, max: i64 },

    /// Tick spacing must be a positive, finite distance.
    #[error("tick gap must be positive and finite, got {0}")]
    InvalidTickGap(f64),
}
