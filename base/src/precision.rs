//! Precision modes.  A precision mode fixes the number of decimal
//! digits retained by every value and the range of exponents which
//! can be represented.  Modes are ordinary values which are handed to
//! the arithmetic unit and to the state-file reader, so several modes
//! can be in use at once (as they are in the tests).
use serde::Serialize;

use super::decimal::MAX_DIGITS;
use super::error::ConfigError;

/// The largest digit count a caller may select.  Storage is wider
/// than this ([`MAX_DIGITS`]) because the transcendental functions
/// carry extra working digits.
pub const MAX_MODE_DIGITS: usize = 34;

/// Exponent limits used for intermediate results.  These are wide
/// enough that no intermediate step of a bounded computation
/// overflows before the final result is narrowed back to the caller's
/// mode.
const WORKING_MIN_EXPONENT: i32 = -999_999_999;
const WORKING_MAX_EXPONENT: i32 = 999_999_999;

/// Limit on the exponent range of a caller-selected mode.  Keeping
/// this far inside the working range means results of the
/// transcendental functions can always be formed before they are
/// checked against the caller's range.
const MAX_MODE_EXPONENT: i32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PrecisionMode {
    digits: usize,
    min_exponent: i32,
    max_exponent: i32,
}

impl PrecisionMode {
    /// The hardware-compatible mode: 12 digits, magnitudes from
    /// 1ᴇ-499 to 9.99999999999ᴇ499.
    pub const HP42S: PrecisionMode = PrecisionMode {
        digits: 12,
        min_exponent: -499,
        max_exponent: 499,
    };

    /// The extended mode: 34 digits with the exponent range of an
    /// IEEE 754 decimal128.
    pub const EXTENDED: PrecisionMode = PrecisionMode {
        digits: 34,
        min_exponent: -6143,
        max_exponent: 6144,
    };

    pub fn custom(
        digits: usize,
        min_exponent: i32,
        max_exponent: i32,
    ) -> Result<PrecisionMode, ConfigError> {
        if digits == 0 || digits > MAX_MODE_DIGITS {
            return Err(ConfigError::DigitsOutOfRange {
                digits,
                max: MAX_MODE_DIGITS,
            });
        }
        if min_exponent >= 0
            || max_exponent <= 0
            || min_exponent < -MAX_MODE_EXPONENT
            || max_exponent > MAX_MODE_EXPONENT
        {
            return Err(ConfigError::BadExponentRange {
                min: min_exponent,
                max: max_exponent,
            });
        }
        Ok(PrecisionMode {
            digits,
            min_exponent,
            max_exponent,
        })
    }

    /// Number of significant digits retained (P).
    pub const fn digits(&self) -> usize {
        self.digits
    }

    pub const fn min_exponent(&self) -> i32 {
        self.min_exponent
    }

    pub const fn max_exponent(&self) -> i32 {
        self.max_exponent
    }

    pub const fn contains_exponent(&self, exponent: i64) -> bool {
        exponent >= self.min_exponent as i64 && exponent <= self.max_exponent as i64
    }

    /// Returns a mode with `extra` more digits (limited by the
    /// storage capacity) and the working exponent range.  This is the
    /// mode in which intermediate results are computed.
    pub fn widened(&self, extra: usize) -> PrecisionMode {
        PrecisionMode {
            digits: (self.digits + extra).min(MAX_DIGITS),
            min_exponent: WORKING_MIN_EXPONENT,
            max_exponent: WORKING_MAX_EXPONENT,
        }
    }

    /// Returns a mode with the same exponent range but `digits`
    /// digits (limited to 1..=[`MAX_DIGITS`]).
    pub fn with_digits(&self, digits: usize) -> PrecisionMode {
        PrecisionMode {
            digits: digits.clamp(1, MAX_DIGITS),
            ..*self
        }
    }

    /// Returns the widest mode the storage supports.
    pub fn widest() -> PrecisionMode {
        PrecisionMode {
            digits: MAX_DIGITS,
            min_exponent: WORKING_MIN_EXPONENT,
            max_exponent: WORKING_MAX_EXPONENT,
        }
    }
}

impl Default for PrecisionMode {
    fn default() -> PrecisionMode {
        PrecisionMode::HP42S
    }
}
