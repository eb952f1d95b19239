//! The four basic operations, comparison, rounding and the integer
//! operations (IP, FP, MOD).
//!
//! Addition works in a window of P digits plus one guard digit.  The
//! operand with the smaller exponent is shifted right into that
//! window and any of its digits which fall off the end are simply
//! lost, just as they are in the calculator's adder.  The result is
//! then rounded half away from zero on the guard digit.
use std::cmp::Ordering;

use base::prelude::*;

use super::digits;
use super::unit::ArithmeticUnit;


/// Limit on the number of dividend digits processed by
/// [`ArithmeticUnit::remainder`].  This comfortably covers any pair
/// of values in a caller-selected mode.
const MAX_REMAINDER_STEPS: i64 = 20_000;

/// Handles NaN and Error operands.  Error takes precedence over NaN
/// and neither raises a new signal, so a single failure is reported
/// only once however many operations its result flows through.
pub(crate) fn propagate(a: &Decimal, b: &Decimal) -> Option<Outcome> {
    if a.is_error() || b.is_error() {
        Some(Outcome::exact(Decimal::ERROR))
    } else if a.is_nan() || b.is_nan() {
        Some(Outcome::exact(Decimal::NAN))
    } else {
        None
    }
}

pub(crate) fn propagate1(a: &Decimal) -> Option<Outcome> {
    propagate(a, a)
}

pub(crate) const fn invalid() -> Outcome {
    Outcome::signalled(Decimal::NAN, Signal::InvalidOperation)
}

/// The significant digits of `x`, limited to `p` of them.
fn leading(x: &Decimal, p: usize) -> &[u8] {
    let sig = x.significant();
    &sig[..sig.len().min(p)]
}

impl ArithmeticUnit {
    pub fn add(&self, a: &Decimal, b: &Decimal) -> Outcome {
        if let Some(out) = propagate(a, b) {
            return out;
        }
        match (a.class(), b.class()) {
            (Class::Infinity, Class::Infinity) => {
                if a.is_negative() == b.is_negative() {
                    Outcome::exact(*a)
                } else {
                    invalid()
                }
            }
            (Class::Infinity, _) => Outcome::exact(*a),
            (_, Class::Infinity) => Outcome::exact(*b),
            (Class::Zero, Class::Zero) => {
                Outcome::exact(Decimal::zero(a.is_negative() && b.is_negative()))
            }
            (Class::Zero, _) => b.rounded_to(self.mode()),
            (_, Class::Zero) => a.rounded_to(self.mode()),
            _ => self.add_normal(a, b),
        }
    }

    fn add_normal(&self, a: &Decimal, b: &Decimal) -> Outcome {
        let p = self.precision();
        let (big, small) = if a.exponent() >= b.exponent() {
            (a, b)
        } else {
            (b, a)
        };
        let shift = i64::from(big.exponent()) - i64::from(small.exponent());
        // A carry slot, P digits and the guard digit.
        let width = p + 2;
        let mut x = [0_u8; MAX_DIGITS + 2];
        let mut y = [0_u8; MAX_DIGITS + 2];
        for (i, d) in leading(big, p).iter().enumerate() {
            x[1 + i] = *d;
        }
        for (i, d) in leading(small, p).iter().enumerate() {
            let pos = 1 + i as i64 + shift;
            if pos >= width as i64 {
                break;
            }
            y[pos as usize] = *d;
        }
        let (x, y) = (&mut x[..width], &mut y[..width]);
        let negative = if big.is_negative() == small.is_negative() {
            // The carry slot absorbs any carry.
            digits::add_in_place(x, y);
            big.is_negative()
        } else {
            match digits::compare(x, y) {
                Ordering::Greater => {
                    digits::sub_in_place(x, y);
                    big.is_negative()
                }
                Ordering::Less => {
                    digits::sub_in_place(y, x);
                    x.copy_from_slice(y);
                    small.is_negative()
                }
                Ordering::Equal => {
                    return Outcome::exact(Decimal::ZERO);
                }
            }
        };
        Decimal::round_digits(negative, i64::from(big.exponent()) + 1, x, self.mode())
    }

    pub fn subtract(&self, a: &Decimal, b: &Decimal) -> Outcome {
        self.add(a, &b.negated())
    }

    pub fn multiply(&self, a: &Decimal, b: &Decimal) -> Outcome {
        if let Some(out) = propagate(a, b) {
            return out;
        }
        let negative = a.is_negative() != b.is_negative();
        match (a.class(), b.class()) {
            (Class::Infinity, Class::Zero) | (Class::Zero, Class::Infinity) => invalid(),
            (Class::Infinity, _) | (_, Class::Infinity) => {
                Outcome::exact(Decimal::infinity(negative))
            }
            (Class::Zero, _) | (_, Class::Zero) => Outcome::exact(Decimal::zero(negative)),
            _ => self.multiply_normal(a, b, negative),
        }
    }

    fn multiply_normal(&self, a: &Decimal, b: &Decimal, negative: bool) -> Outcome {
        let p = self.precision();
        let (da, db) = (leading(a, p), leading(b, p));
        // Position 0 only ever receives a carry: each mantissa is
        // below 10, so their product is below 100.
        let mut acc = [0_u32; 2 * MAX_DIGITS + 1];
        for (i, x) in da.iter().enumerate() {
            if *x == 0 {
                continue;
            }
            for (j, y) in db.iter().enumerate() {
                acc[i + j + 1] += u32::from(*x) * u32::from(*y);
            }
        }
        let len = da.len() + db.len();
        let mut product = [0_u8; 2 * MAX_DIGITS + 1];
        let mut carry = 0_u32;
        for k in (0..len).rev() {
            let v = acc[k] + carry;
            product[k] = (v % 10) as u8;
            carry = v / 10;
        }
        Decimal::round_digits(
            negative,
            i64::from(a.exponent()) + i64::from(b.exponent()) + 1,
            &product[..len],
            self.mode(),
        )
    }

    pub fn divide(&self, a: &Decimal, b: &Decimal) -> Outcome {
        if let Some(out) = propagate(a, b) {
            return out;
        }
        let negative = a.is_negative() != b.is_negative();
        match (a.class(), b.class()) {
            (Class::Zero, Class::Zero) | (Class::Infinity, Class::Infinity) => invalid(),
            (Class::Infinity, _) => Outcome::exact(Decimal::infinity(negative)),
            (_, Class::Infinity) => Outcome::exact(Decimal::zero(negative)),
            (_, Class::Zero) => {
                Outcome::signalled(Decimal::infinity(negative), Signal::DivideByZero)
            }
            (Class::Zero, _) => Outcome::exact(Decimal::zero(negative)),
            _ => self.divide_normal(a, b, negative),
        }
    }

    /// Long division, one decimal digit at a time, producing P digits
    /// and a guard digit.
    fn divide_normal(&self, a: &Decimal, b: &Decimal, negative: bool) -> Outcome {
        let p = self.precision();
        let (da, db) = (leading(a, p), leading(b, p));
        // The remainder and divisor carry a spare digit at the top.
        let len = da.len().max(db.len()) + 1;
        let mut rem = [0_u8; MAX_DIGITS + 1];
        let mut divisor = [0_u8; MAX_DIGITS + 1];
        rem[1..=da.len()].copy_from_slice(da);
        divisor[1..=db.len()].copy_from_slice(db);
        let (rem, divisor) = (&mut rem[..len], &divisor[..len]);
        // The first quotient digit is zero when the dividend's
        // mantissa is the smaller, so produce one extra.
        let mut quotient = [0_u8; MAX_DIGITS + 2];
        for q in quotient.iter_mut().take(p + 2) {
            let mut count = 0;
            while digits::compare(rem, divisor) != Ordering::Less {
                digits::sub_in_place(rem, divisor);
                count += 1;
            }
            *q = count;
            if rem.iter().all(|d| *d == 0) {
                break;
            }
            digits::shift_left(rem, 0);
        }
        Decimal::round_digits(
            negative,
            i64::from(a.exponent()) - i64::from(b.exponent()),
            &quotient[..p + 2],
            self.mode(),
        )
    }

    pub fn reciprocal(&self, x: &Decimal) -> Outcome {
        self.divide(&Decimal::ONE, x)
    }

    pub fn square(&self, x: &Decimal) -> Outcome {
        self.multiply(x, x)
    }

    /// Compares two values.  This never raises a signal; comparisons
    /// involving NaN or Error are [`Comparison::Unordered`].
    pub fn compare(&self, a: &Decimal, b: &Decimal) -> Comparison {
        a.compare(b)
    }

    pub fn negate(&self, x: &Decimal) -> Outcome {
        Outcome::exact(x.negated())
    }

    pub fn abs(&self, x: &Decimal) -> Outcome {
        Outcome::exact(x.abs())
    }

    /// Rounds to `n` significant digits (at least one, at most P).
    pub fn round_significant(&self, x: &Decimal, n: usize) -> Outcome {
        if !x.is_normal() {
            return Outcome::exact(*x);
        }
        let mode = self.mode().with_digits(n.clamp(1, self.precision()));
        Decimal::round_digits(
            x.is_negative(),
            x.exponent().into(),
            x.significant(),
            &mode,
        )
    }

    /// Rounds to `places` digits after the decimal point.  A negative
    /// `places` rounds to a multiple of a power of ten.
    pub fn round_places(&self, x: &Decimal, places: i32) -> Outcome {
        if !x.is_normal() {
            return Outcome::exact(*x);
        }
        let exponent = i64::from(x.exponent());
        let keep = exponent + 1 + i64::from(places);
        if keep >= self.precision() as i64 {
            return x.rounded_to(self.mode());
        }
        if keep < 0 || (keep == 0 && x.digit(0) < 5) {
            return Outcome::exact(Decimal::zero(x.is_negative()));
        }
        if keep == 0 {
            // Rounds up to one unit in the last place kept.
            return Decimal::round_digits(x.is_negative(), exponent + 1, &[1], self.mode());
        }
        // Checked above: 0 < keep < P.
        let mode = self.mode().with_digits(keep as usize);
        Decimal::round_digits(x.is_negative(), exponent, x.significant(), &mode)
    }

    /// The integer part, truncating towards zero (IP).
    pub fn integer_part(&self, x: &Decimal) -> Outcome {
        if !x.is_normal() {
            return Outcome::exact(*x);
        }
        if x.exponent() < 0 {
            return Outcome::exact(Decimal::zero(x.is_negative()));
        }
        let sig = x.significant();
        let keep = (x.exponent() as usize + 1).min(sig.len());
        Decimal::round_digits(
            x.is_negative(),
            x.exponent().into(),
            &sig[..keep],
            self.mode(),
        )
    }

    /// The fractional part, with the sign of `x` (FP).
    pub fn fractional_part(&self, x: &Decimal) -> Outcome {
        match x.class() {
            Class::Infinity => invalid(),
            Class::Normal if x.exponent() >= 0 => {
                let sig = x.significant();
                let start = x.exponent() as usize + 1;
                if start >= sig.len() {
                    Outcome::exact(Decimal::zero(x.is_negative()))
                } else {
                    Decimal::round_digits(x.is_negative(), -1, &sig[start..], self.mode())
                }
            }
            Class::Normal => x.rounded_to(self.mode()),
            _ => Outcome::exact(*x),
        }
    }

    /// The exact remainder of truncating division; the result has the
    /// sign of `a`.  `x` rem 0 is an invalid operation.
    pub fn remainder(&self, a: &Decimal, b: &Decimal) -> Outcome {
        if let Some(out) = propagate(a, b) {
            return out;
        }
        match (a.class(), b.class()) {
            (Class::Infinity, _) | (_, Class::Zero) => invalid(),
            (_, Class::Infinity) | (Class::Zero, _) => a.rounded_to(self.mode()),
            _ => {
                if a.abs() < b.abs() {
                    a.rounded_to(self.mode())
                } else {
                    self.remainder_normal(a, b)
                }
            }
        }
    }

    /// Streams the digits of `a` through a remainder register no
    /// wider than `b`.  Both operands are scaled to the exponent of
    /// the lower of their least significant digits, so the remainder
    /// is exact.
    fn remainder_normal(&self, a: &Decimal, b: &Decimal) -> Outcome {
        let lsd = a.lsd_exponent().min(b.lsd_exponent());
        let steps = i64::from(a.exponent()) - lsd + 1;
        let divisor_len = i64::from(b.exponent()) - lsd + 1;
        if steps > MAX_REMAINDER_STEPS || divisor_len > MAX_DIGITS as i64 {
            return Outcome::signalled(Decimal::NAN, Signal::OutOfRange);
        }
        // Both bounds were checked just above.
        let (steps, divisor_len) = (steps as usize, divisor_len as usize);
        let len = divisor_len + 1;
        let mut divisor = [0_u8; MAX_DIGITS + 1];
        let sig = b.significant();
        divisor[1..=sig.len()].copy_from_slice(sig);
        let mut rem = [0_u8; MAX_DIGITS + 1];
        let (rem, divisor) = (&mut rem[..len], &divisor[..len]);
        for i in 0..steps {
            digits::shift_left(rem, a.digit(i));
            while digits::compare(rem, divisor) != Ordering::Less {
                digits::sub_in_place(rem, divisor);
            }
        }
        Decimal::round_digits(
            a.is_negative(),
            lsd + divisor_len as i64,
            rem,
            self.mode(),
        )
    }

    /// The calculator's MOD: the result has the sign of the divisor,
    /// and `x` MOD 0 is `x`.
    pub fn modulo(&self, a: &Decimal, b: &Decimal) -> Outcome {
        if let Some(out) = propagate(a, b) {
            return out;
        }
        match (a.class(), b.class()) {
            (_, Class::Zero) => a.rounded_to(self.mode()),
            (Class::Infinity, _) => invalid(),
            (Class::Zero, _) => Outcome::exact(Decimal::ZERO),
            (_, Class::Infinity) => {
                if a.is_negative() == b.is_negative() {
                    Outcome::exact(*a)
                } else {
                    invalid()
                }
            }
            _ => {
                let r = self.remainder(a, b);
                if !r.signal.is_none() {
                    r
                } else if r.value.is_zero() {
                    Outcome::exact(Decimal::ZERO)
                } else if r.value.is_negative() != b.is_negative() {
                    self.add(&r.value, b)
                } else {
                    r
                }
            }
        }
    }

    pub fn from_i64(&self, n: i64) -> Outcome {
        let mut m = n.unsigned_abs();
        if m == 0 {
            return Outcome::exact(Decimal::ZERO);
        }
        let mut buf = [0_u8; 20];
        let mut start = buf.len();
        while m > 0 {
            start -= 1;
            buf[start] = (m % 10) as u8;
            m /= 10;
        }
        let exponent = (buf.len() - start - 1) as i64;
        Decimal::round_digits(n < 0, exponent, &buf[start..], self.mode())
    }

    /// Converts to an integer, truncating any fractional part.
    pub fn to_i64(&self, x: &Decimal) -> Result<i64, Signal> {
        match x.class() {
            Class::Zero => Ok(0),
            Class::NaN | Class::Error => Err(Signal::InvalidOperation),
            Class::Infinity => Err(Signal::OutOfRange),
            Class::Normal => {
                if x.exponent() < 0 {
                    return Ok(0);
                }
                if x.exponent() >= 19 {
                    return Err(Signal::OutOfRange);
                }
                let magnitude: i128 = (0..=x.exponent() as usize)
                    .fold(0_i128, |acc, i| acc * 10 + i128::from(x.digit(i)));
                let value = if x.is_negative() {
                    -magnitude
                } else {
                    magnitude
                };
                i64::try_from(value).map_err(|_| Signal::OutOfRange)
            }
        }
    }
}
