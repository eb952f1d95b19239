//! Storage for calculator numbers.
//!
//! A [`Decimal`] holds a sign, an exponent and a fixed-size array of
//! decimal digits.  The value of a normal number is
//! `d₀.d₁d₂…dₚ₋₁ × 10^exponent` where `d₀` is never zero.  Digits
//! beyond the precision of the mode which produced the value are
//! always zero.
//!
//! Values never change once constructed.  All of the arithmetic is
//! done by the `alu` crate; the only computation done here is
//! [`Decimal::round_digits`], which is the single place where digit
//! strings of arbitrary length are normalized, rounded to a precision
//! mode and checked against its exponent range.
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

use serde::{Serialize, Serializer};

use super::error::DigitError;
use super::precision::PrecisionMode;
use super::signal::{Comparison, Outcome, Signal};

#[cfg(test)]
mod tests;

/// Number of digit positions in every [`Decimal`].
pub const MAX_DIGITS: usize = 64;

/// Distinguishes ordinary numbers from the special values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Class {
    Normal,
    Zero,
    Infinity,
    NaN,
    /// A sentinel produced by the calculator when a computation
    /// failed; unlike NaN it is never produced by arithmetic on
    /// ordinary values, only propagated.
    Error,
}

#[derive(Clone, Copy)]
pub struct Decimal {
    class: Class,
    negative: bool,
    exponent: i32,
    digits: [u8; MAX_DIGITS],
}

impl Decimal {
    pub const ZERO: Decimal = Decimal::special(Class::Zero, false);
    pub const NEGATIVE_ZERO: Decimal = Decimal::special(Class::Zero, true);
    pub const INFINITY: Decimal = Decimal::special(Class::Infinity, false);
    pub const NEGATIVE_INFINITY: Decimal = Decimal::special(Class::Infinity, true);
    pub const NAN: Decimal = Decimal::special(Class::NaN, false);
    pub const ERROR: Decimal = Decimal::special(Class::Error, false);
    pub const ONE: Decimal = Decimal::single_digit(1, 0);

    const fn special(class: Class, negative: bool) -> Decimal {
        Decimal {
            class,
            negative,
            exponent: 0,
            digits: [0; MAX_DIGITS],
        }
    }

    const fn single_digit(d: u8, exponent: i32) -> Decimal {
        let mut digits = [0; MAX_DIGITS];
        digits[0] = d;
        Decimal {
            class: Class::Normal,
            negative: false,
            exponent,
            digits,
        }
    }

    pub const fn zero(negative: bool) -> Decimal {
        Decimal::special(Class::Zero, negative)
    }

    pub const fn infinity(negative: bool) -> Decimal {
        Decimal::special(Class::Infinity, negative)
    }

    pub const fn nan() -> Decimal {
        Decimal::NAN
    }

    pub const fn error() -> Decimal {
        Decimal::ERROR
    }

    /// Returns 10^exponent.  The caller is responsible for staying
    /// within the exponent range of whatever mode the value is used
    /// with.
    pub const fn power_of_ten(exponent: i32) -> Decimal {
        Decimal::single_digit(1, exponent)
    }

    /// Builds a value from its parts, validating them against `mode`.
    /// An all-zero digit list produces a (signed) zero.
    pub fn new(
        negative: bool,
        exponent: i32,
        digits: &[u8],
        mode: &PrecisionMode,
    ) -> Result<Decimal, DigitError> {
        if digits.is_empty() {
            return Err(DigitError::Empty);
        }
        if digits.len() > mode.digits() {
            return Err(DigitError::TooManyDigits {
                supplied: digits.len(),
                precision: mode.digits(),
            });
        }
        if let Some((position, value)) = digits.iter().enumerate().find(|(_, d)| **d > 9) {
            return Err(DigitError::NotADigit {
                position,
                value: *value,
            });
        }
        if digits.iter().all(|d| *d == 0) {
            return Ok(Decimal::zero(negative));
        }
        if digits[0] == 0 {
            return Err(DigitError::NotNormalized);
        }
        if !mode.contains_exponent(exponent.into()) {
            return Err(DigitError::ExponentOutOfRange {
                exponent,
                min: mode.min_exponent(),
                max: mode.max_exponent(),
            });
        }
        let mut stored = [0; MAX_DIGITS];
        stored[..digits.len()].copy_from_slice(digits);
        Ok(Decimal {
            class: Class::Normal,
            negative,
            exponent,
            digits: stored,
        })
    }

    /// Builds a value from a digit string of any length (which may
    /// have leading zeros).  The first digit of `digits` has weight
    /// `10^exponent`.  The result is rounded to the precision of
    /// `mode` using round-half-away-from-zero, looking only at the
    /// first discarded digit.  A result whose exponent is outside the
    /// range of `mode` is replaced by a signed infinity (with
    /// [`Signal::Overflow`]) or a signed zero (with
    /// [`Signal::Underflow`]).  A digit string containing only zeros
    /// yields a zero with the given sign and no signal.
    pub fn round_digits(
        negative: bool,
        exponent: i64,
        digits: &[u8],
        mode: &PrecisionMode,
    ) -> Outcome {
        let first = match digits.iter().position(|d| *d != 0) {
            Some(pos) => pos,
            None => {
                return Outcome::exact(Decimal::zero(negative));
            }
        };
        let p = mode.digits();
        let mut exponent: i64 = exponent - first as i64;
        let significant = &digits[first..];
        let mut stored = [0_u8; MAX_DIGITS];
        let kept = significant.len().min(p);
        stored[..kept].copy_from_slice(&significant[..kept]);
        if significant.get(p).copied().unwrap_or(0) >= 5 {
            let mut pos = p;
            loop {
                if pos == 0 {
                    // Carry out of the top digit; every retained
                    // digit is now zero.
                    stored[0] = 1;
                    exponent += 1;
                    break;
                }
                pos -= 1;
                if stored[pos] == 9 {
                    stored[pos] = 0;
                } else {
                    stored[pos] += 1;
                    break;
                }
            }
        }
        if exponent > mode.max_exponent() as i64 {
            Outcome::signalled(Decimal::infinity(negative), Signal::Overflow)
        } else if exponent < mode.min_exponent() as i64 {
            Outcome::signalled(Decimal::zero(negative), Signal::Underflow)
        } else {
            Outcome::exact(Decimal {
                class: Class::Normal,
                negative,
                // Checked against the mode's (i32) range just above.
                exponent: exponent as i32,
                digits: stored,
            })
        }
    }

    /// Rounds this value into `mode`.  Special values are unchanged.
    pub fn rounded_to(&self, mode: &PrecisionMode) -> Outcome {
        match self.class {
            Class::Normal => Decimal::round_digits(
                self.negative,
                self.exponent.into(),
                self.significant(),
                mode,
            ),
            _ => Outcome::exact(*self),
        }
    }

    pub const fn class(&self) -> Class {
        self.class
    }

    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Returns the digit at `position` (0 is the most significant).
    /// Positions beyond the storage capacity read as zero.
    pub fn digit(&self, position: usize) -> u8 {
        self.digits.get(position).copied().unwrap_or(0)
    }

    pub const fn digits(&self) -> &[u8; MAX_DIGITS] {
        &self.digits
    }

    /// Number of digits up to and including the last non-zero one.
    pub fn significant_digits(&self) -> usize {
        self.digits
            .iter()
            .rposition(|d| *d != 0)
            .map_or(0, |pos| pos + 1)
    }

    /// The digits up to and including the last non-zero one.
    pub fn significant(&self) -> &[u8] {
        &self.digits[..self.significant_digits()]
    }

    pub const fn is_normal(&self) -> bool {
        matches!(self.class, Class::Normal)
    }

    pub const fn is_zero(&self) -> bool {
        matches!(self.class, Class::Zero)
    }

    pub const fn is_infinite(&self) -> bool {
        matches!(self.class, Class::Infinity)
    }

    pub const fn is_nan(&self) -> bool {
        matches!(self.class, Class::NaN)
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.class, Class::Error)
    }

    /// True for zero and normal values.
    pub const fn is_finite(&self) -> bool {
        matches!(self.class, Class::Normal | Class::Zero)
    }

    /// True for NaN and Error, the classes which propagate through
    /// arithmetic without raising further signals.
    pub const fn is_unordered(&self) -> bool {
        matches!(self.class, Class::NaN | Class::Error)
    }

    /// True when the value is a whole number (zero counts).
    pub fn is_integer(&self) -> bool {
        match self.class {
            Class::Zero => true,
            Class::Normal => {
                self.exponent >= 0 && self.significant_digits() as i64 <= self.exponent as i64 + 1
            }
            _ => false,
        }
    }

    /// Exponent of the least significant non-zero digit.
    pub fn lsd_exponent(&self) -> i64 {
        self.exponent as i64 - self.significant_digits().saturating_sub(1) as i64
    }

    #[must_use]
    pub const fn with_sign(&self, negative: bool) -> Decimal {
        match self.class {
            Class::NaN | Class::Error => *self,
            _ => Decimal {
                class: self.class,
                negative,
                exponent: self.exponent,
                digits: self.digits,
            },
        }
    }

    #[must_use]
    pub const fn negated(&self) -> Decimal {
        self.with_sign(!self.negative)
    }

    #[must_use]
    pub const fn abs(&self) -> Decimal {
        self.with_sign(false)
    }

    /// Compares two values numerically.  Signed zeros compare equal
    /// and anything involving NaN or Error is unordered (including a
    /// NaN compared with itself).
    pub fn compare(&self, other: &Decimal) -> Comparison {
        if self.is_unordered() || other.is_unordered() {
            return Comparison::Unordered;
        }
        match (self.class, other.class) {
            (Class::Zero, Class::Zero) => Comparison::Equal,
            (Class::Infinity, Class::Infinity) => {
                Comparison::from(other.negative.cmp(&self.negative))
            }
            (Class::Infinity, _) => sign_order(self.negative),
            (_, Class::Infinity) => sign_order(other.negative).reverse(),
            (Class::Zero, _) => sign_order(other.negative).reverse(),
            (_, Class::Zero) => sign_order(self.negative),
            _ => {
                if self.negative != other.negative {
                    return sign_order(self.negative);
                }
                let magnitude = self.compare_magnitude(other);
                if self.negative {
                    Comparison::from(magnitude.reverse())
                } else {
                    Comparison::from(magnitude)
                }
            }
        }
    }

    /// Compares the magnitudes of two normal values.
    fn compare_magnitude(&self, other: &Decimal) -> Ordering {
        self.exponent
            .cmp(&other.exponent)
            .then_with(|| self.digits.cmp(&other.digits))
    }

    /// True when both values have the same class, sign, exponent and
    /// digits.  Unlike `==`, this distinguishes +0 from -0 and treats
    /// a NaN as identical to another NaN.
    pub fn is_identical(&self, other: &Decimal) -> bool {
        self.class == other.class
            && self.negative == other.negative
            && self.exponent == other.exponent
            && self.digits == other.digits
    }
}

/// Ordering of a non-zero value of the given sign relative to zero.
const fn sign_order(negative: bool) -> Comparison {
    if negative {
        Comparison::Less
    } else {
        Comparison::Greater
    }
}

impl Default for Decimal {
    fn default() -> Decimal {
        Decimal::ZERO
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Decimal) -> bool {
        self.compare(other) == Comparison::Equal
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        self.compare(other).to_ordering()
    }
}

/// The canonical text form shows every significant digit in
/// scientific notation (for example `-1.25E3`).  Display formatting
/// as the calculator would show it is done by the `alu` crate.
impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let sign = if self.negative { "-" } else { "" };
        match self.class {
            Class::Zero => write!(f, "{sign}0"),
            Class::Infinity => write!(f, "{sign}Infinity"),
            Class::NaN => f.write_str("NaN"),
            Class::Error => f.write_str("Error"),
            Class::Normal => {
                let sig = self.significant();
                write!(f, "{sign}{}", sig[0])?;
                if sig.len() > 1 {
                    f.write_str(".")?;
                    for d in &sig[1..] {
                        write!(f, "{d}")?;
                    }
                }
                if self.exponent != 0 {
                    write!(f, "E{}", self.exponent)?;
                }
                Ok(())
            }
        }
    }
}

impl Debug for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Decimal({self})")
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
