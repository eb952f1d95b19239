//! Conversion of text into numbers.
use base::prelude::*;

use super::arith::invalid;
use super::unit::ArithmeticUnit;


/// The exponent marker shown on the calculator's display.
pub(crate) const EXPONENT_GLYPH: char = '\u{1D07}';

/// Typed exponents saturate at this magnitude.  Anything this large
/// is far outside every precision mode and so becomes an overflow or
/// an underflow.
const EXPONENT_LIMIT: i64 = 1_000_000_000_000;

/// The digits of a mantissa, as far as we need to keep them.
struct Mantissa {
    digits: [u8; MAX_DIGITS + 1],
    kept: usize,
    /// Number of digit characters read, including leading zeros.
    read: usize,
    /// Value of `read` when the radix mark was seen.
    point: Option<usize>,
    /// Value of `read` when the first non-zero digit was seen.
    first: Option<usize>,
}

impl Mantissa {
    fn new() -> Mantissa {
        Mantissa {
            digits: [0; MAX_DIGITS + 1],
            kept: 0,
            read: 0,
            point: None,
            first: None,
        }
    }

    fn push(&mut self, digit: u8, capacity: usize) {
        if digit != 0 && self.first.is_none() {
            self.first = Some(self.read);
        }
        if self.first.is_some() && self.kept < capacity {
            self.digits[self.kept] = digit;
            self.kept += 1;
        }
        self.read += 1;
    }

    /// Exponent of the first significant digit, before any explicit
    /// exponent is applied.
    fn leading_exponent(&self) -> i64 {
        let point = self.point.unwrap_or(self.read) as i64;
        match self.first {
            Some(first) => point - first as i64 - 1,
            None => 0,
        }
    }
}

fn parse_exponent<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Option<i64> {
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    let mut any = false;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        any = true;
        value = (value * 10 + i64::from(d)).min(EXPONENT_LIMIT);
    }
    if !any {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn parse_finite(text: &str, mode: &PrecisionMode) -> Option<Outcome> {
    let mut chars = text.chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };
    // One digit beyond the precision decides the rounding.
    let capacity = mode.digits() + 1;
    let mut mantissa = Mantissa::new();
    let mut exponent: i64 = 0;
    let mut has_exponent = false;
    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => {
                // `c` is an ASCII digit.
                mantissa.push(c as u8 - b'0', capacity);
            }
            '.' if mantissa.point.is_none() => {
                mantissa.point = Some(mantissa.read);
            }
            'E' | 'e' | EXPONENT_GLYPH => {
                exponent = parse_exponent(&mut chars)?;
                has_exponent = true;
                break;
            }
            _ => {
                return None;
            }
        }
    }
    if chars.next().is_some() {
        return None;
    }
    if mantissa.read == 0 {
        // On the keyboard, pressing E first means 1E.
        if !has_exponent || mantissa.point.is_some() {
            return None;
        }
        mantissa.push(1, capacity);
    }
    Some(Decimal::round_digits(
        negative,
        mantissa.leading_exponent() + exponent,
        &mantissa.digits[..mantissa.kept],
        mode,
    ))
}

impl ArithmeticUnit {
    /// Converts text to a number.  Digits beyond the precision are
    /// rounded, not truncated.  Malformed text yields NaN with
    /// [`Signal::InvalidOperation`].
    pub fn parse(&self, text: &str) -> Outcome {
        match text.trim() {
            "Infinity" | "+Infinity" => Outcome::exact(Decimal::INFINITY),
            "-Infinity" => Outcome::exact(Decimal::NEGATIVE_INFINITY),
            "NaN" => Outcome::exact(Decimal::NAN),
            trimmed => parse_finite(trimmed, self.mode()).unwrap_or_else(invalid),
        }
    }
}
