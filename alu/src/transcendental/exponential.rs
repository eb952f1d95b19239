//! Exponentials, logarithms and the square root.
use base::prelude::*;

use super::super::arith::{invalid, propagate1};
use super::super::constants;
use super::super::unit::ArithmeticUnit;
use super::{exp_out_of_range, Working};

/// Each squaring doubles the reduced argument of the exponential.
const EXP_SQUARINGS: usize = 8;

/// Newton steps taken from the binary floating point estimate of a
/// square root.  Each one doubles the number of correct digits, and
/// the estimate is good to about fifteen.
const SQRT_STEPS: usize = 4;

impl Working {
    /// e^x, for a finite `x` of magnitude below 10^8.
    /// `x` may carry as many digits as the reduction unit holds.
    pub(crate) fn exp(&self, x: &Decimal) -> Decimal {
        if x.is_zero() {
            return Decimal::ONE;
        }
        // x = k ln 10 + r, with |r| <= ln 10 / 2.
        let ln_10 = constants::ln_10(self.reduce.mode());
        let k = self.keep(self.reduce.divide(x, &ln_10));
        let k = self.keep(self.reduce.round_places(&k, 0));
        let multiple = self.keep(self.reduce.multiply(&k, &ln_10));
        let r = self.keep(self.reduce.subtract(x, &multiple));
        let r = self.narrowed(&r);
        let r = self.div(&r, &self.int(1 << EXP_SQUARINGS));
        let mut y = self.series(Decimal::ONE, |term, n| {
            self.div(&self.mul(term, &r), &self.int(n as i64))
        });
        for _ in 0..EXP_SQUARINGS {
            y = self.sqr(&y);
        }
        match self
            .reduce
            .to_i64(&k)
            .ok()
            .and_then(|k| i32::try_from(k).ok())
        {
            Some(k) => self.mul(&y, &Decimal::power_of_ten(k)),
            None => {
                self.raise(Signal::OutOfRange);
                Decimal::NAN
            }
        }
    }

    /// e^x - 1 without cancellation for small `x`.
    pub(crate) fn expm1(&self, x: &Decimal) -> Decimal {
        if x.is_zero() {
            return *x;
        }
        if x.exponent() < 0 {
            self.series(*x, |term, n| {
                self.div(&self.mul(term, x), &self.int(n as i64 + 1))
            })
        } else {
            self.sub(&self.exp(x), &Decimal::ONE)
        }
    }

    /// z + z^3/3 + z^5/5 + ..., which is atanh(z).
    pub(crate) fn atanh_series(&self, z: &Decimal) -> Decimal {
        if z.is_zero() {
            return *z;
        }
        let z2 = self.sqr(z);
        let mut power = *z;
        self.series(*z, |_, n| {
            power = self.mul(&power, &z2);
            self.div(&power, &self.int(2 * n as i64 + 1))
        })
    }

    /// ln x for x near one, as 2 atanh((x - 1) / (x + 1)).
    fn ln_near_one(&self, x: &Decimal) -> Decimal {
        let z = self.div(
            &self.sub(x, &Decimal::ONE),
            &self.add(x, &Decimal::ONE),
        );
        let two = self.int(2);
        self.mul(&two, &self.atanh_series(&z))
    }

    /// Natural logarithm of a positive, finite, non-zero `x`.
    pub(crate) fn ln(&self, x: &Decimal) -> Decimal {
        let half = self.half();
        let two = self.int(2);
        if *x >= half && *x <= two {
            return self.ln_near_one(x);
        }
        // x = m 2^c 10^e with 0.75 < m <= 1.5.
        let e = x.exponent();
        let mut m = self.mul(x, &Decimal::power_of_ten(-e));
        let limit = self.add(&Decimal::ONE, &half);
        let mut c: i64 = 0;
        while m > limit {
            m = self.div(&m, &two);
            c += 1;
        }
        let reduce = &self.reduce;
        let offset = self.keep(reduce.add(
            &self.keep(reduce.multiply(
                &self.keep(reduce.from_i64(c)),
                &constants::ln_2(reduce.mode()),
            )),
            &self.keep(reduce.multiply(
                &self.keep(reduce.from_i64(e.into())),
                &constants::ln_10(reduce.mode()),
            )),
        ));
        self.add(&self.ln_near_one(&m), &self.narrowed(&offset))
    }

    /// ln(1 + x) without cancellation for small `x`, which must be
    /// finite and greater than -1.
    pub(crate) fn ln1p(&self, x: &Decimal) -> Decimal {
        if x.is_zero() {
            return *x;
        }
        if x.abs() < self.half() {
            let two = self.int(2);
            let z = self.div(x, &self.add(&two, x));
            self.mul(&two, &self.atanh_series(&z))
        } else {
            self.ln(&self.add(&Decimal::ONE, x))
        }
    }

    /// Square root of a positive, finite, non-zero `x`.
    pub(crate) fn sqrt(&self, x: &Decimal) -> Decimal {
        // x = m 10^(2h) with 1 <= m < 100.
        let e = x.exponent();
        let even = e - e.rem_euclid(2);
        let m = self.mul(x, &Decimal::power_of_ten(-even));
        let estimate = m.to_f64().sqrt();
        let mut g = self.keep(Decimal::from_f64(estimate, self.mode()));
        let half = self.half();
        for _ in 0..SQRT_STEPS {
            g = self.mul(&half, &self.add(&g, &self.div(&m, &g)));
        }
        self.mul(&g, &Decimal::power_of_ten(even / 2))
    }
}

impl ArithmeticUnit {
    /// e^x.
    pub fn exp(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(Decimal::ONE),
            Class::Infinity if x.is_negative() => Outcome::exact(Decimal::ZERO),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                if let Some(out) = exp_out_of_range(x) {
                    return out;
                }
                let w = Working::new(self);
                let y = w.exp(x);
                w.finish(self, y)
            }
        }
    }

    /// 10^x.  Integer powers are exact.
    pub fn exp10(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(Decimal::ONE),
            Class::Infinity if x.is_negative() => Outcome::exact(Decimal::ZERO),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                if let Some(out) = exp_out_of_range(x) {
                    return out;
                }
                if x.is_integer() {
                    if let Ok(k) = self.to_i64(x) {
                        return Decimal::round_digits(false, k, &[1], self.mode());
                    }
                }
                let w = Working::new(self);
                let y = w.keep(
                    w.reduce
                        .multiply(x, &constants::ln_10(w.reduce.mode())),
                );
                let y = w.exp(&y);
                w.finish(self, y)
            }
        }
    }

    /// e^x - 1, accurate for small x.
    pub fn expm1(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(*x),
            Class::Infinity if x.is_negative() => Outcome::exact(Decimal::ONE.negated()),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                if x.is_negative() && x.exponent() >= 7 {
                    return Outcome::exact(Decimal::ONE.negated());
                }
                if let Some(out) = exp_out_of_range(x) {
                    return out;
                }
                let w = Working::new(self);
                let y = w.expm1(x);
                w.finish(self, y)
            }
        }
    }

    /// Natural logarithm.  Zero and negative numbers are invalid.
    pub fn ln(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => invalid(),
            _ if x.is_negative() => invalid(),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                let w = Working::new(self);
                let y = w.ln(x);
                w.finish(self, y)
            }
        }
    }

    /// Common logarithm.  Exact for powers of ten.
    pub fn log10(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => invalid(),
            _ if x.is_negative() => invalid(),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                if x.significant_digits() == 1 && x.digit(0) == 1 {
                    return self.from_i64(x.exponent().into());
                }
                let w = Working::new(self);
                let ln_10 = constants::ln_10(w.mode());
                let y = w.div(&w.ln(x), &ln_10);
                w.finish(self, y)
            }
        }
    }

    /// ln(1 + x), accurate for small x.
    pub fn ln1p(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(*x),
            Class::Infinity if x.is_negative() => invalid(),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                if *x <= Decimal::ONE.negated() {
                    return invalid();
                }
                let w = Working::new(self);
                let y = w.ln1p(x);
                w.finish(self, y)
            }
        }
    }

    /// Square root.  The square root of -0 is -0.
    pub fn sqrt(&self, x: &Decimal) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Zero => Outcome::exact(*x),
            _ if x.is_negative() => invalid(),
            Class::Infinity => Outcome::exact(Decimal::INFINITY),
            _ => {
                let w = Working::new(self);
                let y = w.sqrt(x);
                w.finish(self, y)
            }
        }
    }
}
