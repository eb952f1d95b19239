//! Hyperbolic functions and their inverses, in terms of e^x - 1 and
//! ln(1 + x) so that they keep their precision near zero.
use base::prelude::*;

use super::super::arith::{invalid, propagate1};
use super::super::unit::ArithmeticUnit;
use super::{exp_out_of_range, Working};

impl ArithmeticUnit {
    pub fn sinh(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero | Class::Infinity => Outcome::exact(*x),
            _ => {
                if exp_out_of_range(&x.abs()).is_some() {
                    return Outcome::signalled(
                        Decimal::infinity(x.is_negative()),
                        Signal::Overflow,
                    );
                }
                // With e = e^|x| - 1, sinh |x| = (e + e / (e + 1)) / 2.
                let w = Working::new(self);
                let e = w.expm1(&x.abs());
                let sum = w.add(&e, &w.div(&e, &w.add(&e, &Decimal::ONE)));
                let y = w.mul(&w.half(), &sum);
                w.finish(self, y.with_sign(x.is_negative()))
            }
        }
    }

    pub fn cosh(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(Decimal::ONE),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                if let Some(out) = exp_out_of_range(&x.abs()) {
                    return out;
                }
                let w = Working::new(self);
                let e = w.exp(&x.abs());
                let sum = w.add(&e, &w.div(&Decimal::ONE, &e));
                let y = w.mul(&w.half(), &sum);
                w.finish(self, y)
            }
        }
    }

    pub fn tanh(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(*x),
            Class::Infinity => Outcome::exact(Decimal::ONE.with_sign(x.is_negative())),
            // tanh x differs from 1 by less than 2e^-2000.
            _ if x.exponent() >= 3 => Outcome::exact(Decimal::ONE.with_sign(x.is_negative())),
            _ => {
                // With e = e^(2|x|) - 1, tanh |x| = e / (e + 2).
                let w = Working::new(self);
                let two = w.int(2);
                let e = w.expm1(&w.mul(&two, &x.abs()));
                let y = w.div(&e, &w.add(&e, &two));
                w.finish(self, y.with_sign(x.is_negative()))
            }
        }
    }

    pub fn asinh(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero | Class::Infinity => Outcome::exact(*x),
            _ => {
                // asinh a = ln(1 + a + a^2 / (1 + sqrt(1 + a^2))).
                let w = Working::new(self);
                let a = x.abs();
                let a2 = w.sqr(&a);
                let root = w.sqrt(&w.add(&Decimal::ONE, &a2));
                let t = w.add(&a, &w.div(&a2, &w.add(&Decimal::ONE, &root)));
                let y = w.ln1p(&t);
                w.finish(self, y.with_sign(x.is_negative()))
            }
        }
    }

    /// Inverse hyperbolic cosine; arguments below 1 are invalid.
    pub fn acosh(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.compare(&Decimal::ONE) {
            Comparison::Less | Comparison::Unordered => invalid(),
            Comparison::Equal => Outcome::exact(Decimal::ZERO),
            Comparison::Greater if x.is_infinite() => Outcome::exact(Decimal::INFINITY),
            Comparison::Greater => {
                // acosh x = ln(1 + d + sqrt(d (x + 1))) with d = x - 1.
                let w = Working::new(self);
                let d = w.sub(x, &Decimal::ONE);
                let root = w.sqrt(&w.mul(&d, &w.add(x, &Decimal::ONE)));
                let y = w.ln1p(&w.add(&d, &root));
                w.finish(self, y)
            }
        }
    }

    /// Inverse hyperbolic tangent.  atanh(±1) is an infinity, raising
    /// [`Signal::DivideByZero`].
    pub fn atanh(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        if x.is_zero() {
            return Outcome::exact(*x);
        }
        match x.abs().compare(&Decimal::ONE) {
            Comparison::Greater | Comparison::Unordered => invalid(),
            Comparison::Equal => Outcome::signalled(
                Decimal::infinity(x.is_negative()),
                Signal::DivideByZero,
            ),
            Comparison::Less => {
                // atanh a = ln(1 + 2a / (1 - a)) / 2.
                let w = Working::new(self);
                let a = x.abs();
                let t = w.div(&w.mul(&w.int(2), &a), &w.sub(&Decimal::ONE, &a));
                let y = w.mul(&w.half(), &w.ln1p(&t));
                w.finish(self, y.with_sign(x.is_negative()))
            }
        }
    }
}
