//! Trigonometric functions and their inverses, in any of the three
//! angle modes.
//!
//! In degree and gradian mode the argument is reduced exactly, by a
//! decimal remainder, so results at multiples of a quarter turn are
//! exact.  Radian arguments are reduced by subtracting a multiple of
//! π/2 held to the full storage width; an argument too large for that
//! to leave any correct digits is out of range.
use serde::Serialize;

use base::prelude::*;

use super::super::arith::{invalid, propagate1};
use super::super::constants;
use super::super::unit::ArithmeticUnit;
use super::Working;

/// The unit in which angles are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
    Gradians,
}

impl AngleMode {
    /// The size of a quarter turn, for the modes where it is an
    /// integer.
    const fn quarter_turn(self) -> Option<i64> {
        match self {
            AngleMode::Degrees => Some(90),
            AngleMode::Gradians => Some(100),
            AngleMode::Radians => None,
        }
    }
}

/// An angle reduced to `quadrant` quarter turns plus a remainder of
/// at most an eighth of a turn either way.
struct Reduced {
    quadrant: i64,
    radians: Decimal,
}

impl Working {
    fn pi(&self) -> Decimal {
        constants::pi(self.mode())
    }

    fn reduce_angle(&self, x: &Decimal, angle: AngleMode) -> Option<Reduced> {
        match angle.quarter_turn() {
            Some(quarter) => {
                let quarter = self.int(quarter);
                let full = self.mul(&quarter, &self.int(4));
                let t = self.keep(self.unit.remainder(x, &full));
                if t.is_nan() {
                    return None;
                }
                let q = self.keep(self.unit.round_places(&self.div(&t, &quarter), 0));
                let r = self.sub(&t, &self.mul(&q, &quarter));
                let quadrant = self.unit.to_i64(&q).unwrap_or(0).rem_euclid(4);
                let radians = self.div(&self.mul(&r, &self.pi()), &self.mul(&quarter, &self.int(2)));
                Some(Reduced { quadrant, radians })
            }
            None => {
                // The multiple of π/2 must be known to well beyond the
                // working digits.
                let headroom = (MAX_DIGITS - self.digits()) as i64;
                if x.is_normal() && i64::from(x.exponent()) > headroom {
                    self.raise(Signal::OutOfRange);
                    return None;
                }
                let wide = &self.reduce;
                let half_pi = self.keep(wide.divide(
                    &constants::pi(wide.mode()),
                    &self.keep(wide.from_i64(2)),
                ));
                let k = self.keep(wide.round_places(&self.keep(wide.divide(x, &half_pi)), 0));
                let r = self.keep(wide.subtract(x, &self.keep(wide.multiply(&k, &half_pi))));
                let quadrant = self.keep(wide.remainder(&k, &self.keep(wide.from_i64(4))));
                let quadrant = wide.to_i64(&quadrant).unwrap_or(0).rem_euclid(4);
                Some(Reduced {
                    quadrant,
                    radians: self.narrowed(&r),
                })
            }
        }
    }

    fn sin_series(&self, r: &Decimal) -> Decimal {
        if r.is_zero() {
            return *r;
        }
        let r2 = self.sqr(r);
        self.series(*r, |term, n| {
            let n = n as i64;
            self.div(&self.mul(term, &r2), &self.int(-(2 * n) * (2 * n + 1)))
        })
    }

    fn cos_series(&self, r: &Decimal) -> Decimal {
        let r2 = self.sqr(r);
        self.series(Decimal::ONE, |term, n| {
            let n = n as i64;
            self.div(&self.mul(term, &r2), &self.int(-(2 * n - 1) * (2 * n)))
        })
    }

    /// Sine and cosine of a reduced angle.
    fn sin_cos(&self, reduced: &Reduced) -> (Decimal, Decimal) {
        let s = self.sin_series(&reduced.radians);
        let c = self.cos_series(&reduced.radians);
        match reduced.quadrant {
            0 => (s, c),
            1 => (c, s.negated()),
            2 => (s.negated(), c.negated()),
            _ => (c.negated(), s),
        }
    }

    fn atan_series(&self, a: &Decimal) -> Decimal {
        if a.is_zero() {
            return *a;
        }
        let minus_a2 = self.sqr(a).negated();
        let mut power = *a;
        self.series(*a, |_, n| {
            power = self.mul(&power, &minus_a2);
            self.div(&power, &self.int(2 * n as i64 + 1))
        })
    }

    /// Arctangent in radians.
    fn atan(&self, x: &Decimal) -> Decimal {
        let half_pi = self.div(&self.pi(), &self.int(2));
        if x.is_infinite() {
            return half_pi.with_sign(x.is_negative());
        }
        let a = x.abs();
        let invert = a > Decimal::ONE;
        let mut a = if invert {
            self.div(&Decimal::ONE, &a)
        } else {
            a
        };
        // Each step halves the angle: tan(θ/2) = t / (1 + sqrt(1 + t²)).
        for _ in 0..3 {
            let root = self.sqrt(&self.add(&Decimal::ONE, &self.sqr(&a)));
            a = self.div(&a, &self.add(&Decimal::ONE, &root));
        }
        let mut y = self.mul(&self.int(8), &self.atan_series(&a));
        if invert {
            y = self.sub(&half_pi, &y);
        }
        y.with_sign(x.is_negative())
    }

    /// A quarter turn in the given mode, signed.
    fn quarter_turn(&self, angle: AngleMode, negative: bool) -> Decimal {
        let quarter = match angle.quarter_turn() {
            Some(q) => self.int(q),
            None => self.div(&self.pi(), &self.int(2)),
        };
        quarter.with_sign(negative)
    }

    pub(crate) fn to_radians(&self, x: &Decimal, angle: AngleMode) -> Decimal {
        match angle.quarter_turn() {
            Some(quarter) => self.div(&self.mul(x, &self.pi()), &self.int(2 * quarter)),
            None => *x,
        }
    }

    pub(crate) fn from_radians(&self, x: &Decimal, angle: AngleMode) -> Decimal {
        match angle.quarter_turn() {
            Some(quarter) => self.div(&self.mul(x, &self.int(2 * quarter)), &self.pi()),
            None => *x,
        }
    }
}

/// Trigonometric results which are zero are always positive zero.
fn unsigned_zero(x: Decimal) -> Decimal {
    if x.is_zero() {
        Decimal::ZERO
    } else {
        x
    }
}

impl ArithmeticUnit {
    pub fn sin(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Infinity => invalid(),
            Class::Zero => Outcome::exact(Decimal::ZERO),
            _ => {
                let w = Working::new(self);
                let y = match w.reduce_angle(x, angle) {
                    Some(reduced) => w.sin_cos(&reduced).0,
                    None => Decimal::NAN,
                };
                w.finish(self, unsigned_zero(y))
            }
        }
    }

    pub fn cos(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Infinity => invalid(),
            Class::Zero => Outcome::exact(Decimal::ONE),
            _ => {
                let w = Working::new(self);
                let y = match w.reduce_angle(x, angle) {
                    Some(reduced) => w.sin_cos(&reduced).1,
                    None => Decimal::NAN,
                };
                w.finish(self, unsigned_zero(y))
            }
        }
    }

    /// Tangent.  At an odd multiple of a quarter turn the result is
    /// +∞ with [`Signal::OutOfRange`].
    pub fn tan(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        match x.class() {
            Class::Infinity => invalid(),
            Class::Zero => Outcome::exact(Decimal::ZERO),
            _ => {
                let w = Working::new(self);
                let y = match w.reduce_angle(x, angle) {
                    Some(reduced) => {
                        let (s, c) = w.sin_cos(&reduced);
                        if c.is_zero() {
                            return Outcome::signalled(Decimal::INFINITY, Signal::OutOfRange);
                        }
                        w.div(&s, &c)
                    }
                    None => Decimal::NAN,
                };
                w.finish(self, unsigned_zero(y))
            }
        }
    }

    pub fn atan(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        if x.is_zero() {
            return Outcome::exact(*x);
        }
        let w = Working::new(self);
        if x.is_infinite() {
            let y = w.quarter_turn(angle, x.is_negative());
            return w.finish(self, y);
        }
        let y = w.from_radians(&w.atan(x), angle);
        w.finish(self, y)
    }

    pub fn asin(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        if x.is_zero() {
            return Outcome::exact(*x);
        }
        let w = Working::new(self);
        match x.abs().compare(&Decimal::ONE) {
            Comparison::Greater | Comparison::Unordered => invalid(),
            Comparison::Equal => {
                let y = w.quarter_turn(angle, x.is_negative());
                w.finish(self, y)
            }
            Comparison::Less => {
                // asin x = atan(x / sqrt((1 - x)(1 + x))).
                let d = w.mul(
                    &w.sub(&Decimal::ONE, x),
                    &w.add(&Decimal::ONE, x),
                );
                let t = w.div(x, &w.sqrt(&d));
                let y = w.from_radians(&w.atan(&t), angle);
                w.finish(self, y)
            }
        }
    }

    pub fn acos(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if let Some(out) = propagate1(x) {
            return out;
        }
        let w = Working::new(self);
        if x.is_zero() {
            let y = w.quarter_turn(angle, false);
            return w.finish(self, y);
        }
        match x.abs().compare(&Decimal::ONE) {
            Comparison::Greater | Comparison::Unordered => invalid(),
            Comparison::Equal if x.is_negative() => {
                let y = w.mul(&w.int(2), &w.quarter_turn(angle, false));
                w.finish(self, y)
            }
            Comparison::Equal => Outcome::exact(Decimal::ZERO),
            Comparison::Less => {
                // acos x = 2 atan(sqrt((1 - x) / (1 + x))).
                let q = w.div(
                    &w.sub(&Decimal::ONE, x),
                    &w.add(&Decimal::ONE, x),
                );
                let half = w.atan(&w.sqrt(&q));
                let y = w.from_radians(&w.mul(&w.int(2), &half), angle);
                w.finish(self, y)
            }
        }
    }

    /// Converts an angle in the given mode to radians.
    pub fn to_radians(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if !x.is_normal() {
            return Outcome::exact(*x);
        }
        let w = Working::new(self);
        let y = w.to_radians(x, angle);
        w.finish(self, y)
    }

    /// Converts an angle in radians to the given mode.
    pub fn from_radians(&self, x: &Decimal, angle: AngleMode) -> Outcome {
        if !x.is_normal() {
            return Outcome::exact(*x);
        }
        let w = Working::new(self);
        let y = w.from_radians(x, angle);
        w.finish(self, y)
    }
}
