//! Powers and roots.
use base::prelude::*;

use super::super::arith::{invalid, propagate};
use super::super::unit::ArithmeticUnit;
use super::{is_odd_integer, Working};

/// Integer exponents up to this magnitude are handled by repeated
/// squaring.  The relative error grows with the exponent, so this is
/// done with the extra digits of [`Working::precise`].
const MAX_SQUARING_EXPONENT: u64 = 1 << 31;

impl ArithmeticUnit {
    /// `x` raised to the power `y`.
    pub fn pow(&self, x: &Decimal, y: &Decimal) -> Outcome {
        if let Some(out) = propagate(x, y) {
            return out;
        }
        if y.is_zero() {
            return if x.is_zero() {
                invalid()
            } else {
                Outcome::exact(Decimal::ONE)
            };
        }
        if x.is_zero() {
            return if y.is_negative() {
                Outcome::signalled(Decimal::INFINITY, Signal::DivideByZero)
            } else {
                Outcome::exact(Decimal::ZERO)
            };
        }
        if x.is_negative() && !y.is_integer() {
            return invalid();
        }
        let negative = x.is_negative() && is_odd_integer(y);
        let magnitude = x.abs();
        if y.is_infinite() {
            return match magnitude.compare(&Decimal::ONE) {
                Comparison::Greater if !y.is_negative() => Outcome::exact(Decimal::INFINITY),
                Comparison::Less if y.is_negative() => Outcome::exact(Decimal::INFINITY),
                Comparison::Greater | Comparison::Less => Outcome::exact(Decimal::ZERO),
                Comparison::Equal | Comparison::Unordered => invalid(),
            };
        }
        if x.is_infinite() {
            return Outcome::exact(if y.is_negative() {
                Decimal::zero(negative)
            } else {
                Decimal::infinity(negative)
            });
        }
        let out = match self.to_i64(y) {
            Ok(n) if y.is_integer() && n.unsigned_abs() <= MAX_SQUARING_EXPONENT => {
                self.integer_power(&magnitude, n)
            }
            _ => self.real_power(&magnitude, y),
        };
        Outcome::signalled(out.value.with_sign(negative), out.signal)
    }

    /// `x` to the power `n` by repeated squaring; `x` is positive.
    fn integer_power(&self, x: &Decimal, n: i64) -> Outcome {
        let w = Working::precise(self);
        let mut result = Decimal::ONE;
        let mut base = *x;
        let mut bits = n.unsigned_abs();
        while bits > 0 {
            if bits & 1 == 1 {
                result = w.mul(&result, &base);
            }
            bits >>= 1;
            if bits > 0 {
                base = w.sqr(&base);
            }
        }
        if n < 0 {
            if result.is_infinite() {
                return Outcome::signalled(Decimal::ZERO, Signal::Underflow);
            }
            if result.is_zero() {
                return Outcome::signalled(Decimal::INFINITY, Signal::Overflow);
            }
            result = w.div(&Decimal::ONE, &result);
        }
        w.finish(self, result)
    }

    /// e^(y ln x) for positive finite `x`.
    fn real_power(&self, x: &Decimal, y: &Decimal) -> Outcome {
        let w = Working::precise(self);
        let exponent = w.keep(w.reduce.multiply(&w.ln(x), y));
        self.exp_of(&w, &exponent)
    }

    /// Finishes a power computed as e^t.
    fn exp_of(&self, w: &Working, t: &Decimal) -> Outcome {
        if t.is_normal() && t.exponent() >= 7 {
            return if t.is_negative() {
                Outcome::signalled(Decimal::ZERO, Signal::Underflow)
            } else {
                Outcome::signalled(Decimal::INFINITY, Signal::Overflow)
            };
        }
        let value = w.exp(t);
        w.finish(self, value)
    }

    /// The `n`th root of `x`.  Negative numbers have roots only when
    /// `n` is an odd integer.
    pub fn root(&self, x: &Decimal, n: &Decimal) -> Outcome {
        if let Some(out) = propagate(x, n) {
            return out;
        }
        if n.is_zero() {
            return invalid();
        }
        let negative = x.is_negative();
        if negative && !x.is_zero() && !is_odd_integer(n) {
            return invalid();
        }
        match x.class() {
            Class::Zero => {
                if n.is_negative() {
                    Outcome::signalled(Decimal::INFINITY, Signal::DivideByZero)
                } else {
                    Outcome::exact(*x)
                }
            }
            Class::Infinity => Outcome::exact(if n.is_negative() {
                Decimal::zero(negative)
            } else {
                Decimal::infinity(negative)
            }),
            _ if n.is_infinite() => Outcome::exact(Decimal::ONE.with_sign(negative)),
            _ => {
                let w = Working::precise(self);
                let exponent = w.keep(w.reduce.divide(&w.ln(&x.abs()), n));
                let out = self.exp_of(&w, &exponent);
                Outcome::signalled(out.value.with_sign(negative), out.signal)
            }
        }
    }
}
