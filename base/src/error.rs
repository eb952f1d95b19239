//! Basic error reporting.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Represents a failure to build a [`crate::Decimal`] from a sign,
/// exponent and list of digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitError {
    /// No digits were supplied.
    Empty,
    /// More digits were supplied than the precision mode retains.
    TooManyDigits { supplied: usize, precision: usize },
    /// A value outside 0..=9 appeared in the digit list.
    NotADigit { position: usize, value: u8 },
    /// The leading digit was zero but the value is not zero.
    NotNormalized,
    /// The exponent lies outside the range of the precision mode.
    ExponentOutOfRange { exponent: i32, min: i32, max: i32 },
}

impl Error for DigitError {}

impl Display for DigitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DigitError::Empty => f.write_str("no digits were supplied"),
            DigitError::TooManyDigits {
                supplied,
                precision,
            } => write!(
                f,
                "{supplied} digits were supplied but only {precision} can be retained"
            ),
            DigitError::NotADigit { position, value } => {
                write!(f, "value {value} at position {position} is not a decimal digit")
            }
            DigitError::NotNormalized => {
                f.write_str("the leading digit of a non-zero value must not be zero")
            }
            DigitError::ExponentOutOfRange { exponent, min, max } => {
                write!(f, "exponent {exponent} is outside the range {min}..={max}")
            }
        }
    }
}

/// Represents an invalid [`crate::PrecisionMode`] configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    DigitsOutOfRange { digits: usize, max: usize },
    BadExponentRange { min: i32, max: i32 },
}

impl Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConfigError::DigitsOutOfRange { digits, max } => {
                write!(f, "precision of {digits} digits is outside the range 1..={max}")
            }
            ConfigError::BadExponentRange { min, max } => {
                write!(
                    f,
                    "exponent range {min}..={max} must include zero and be non-empty on both sides"
                )
            }
        }
    }
}
