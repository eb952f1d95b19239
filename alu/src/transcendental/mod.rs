//! The transcendental functions.
//!
//! Each function reduces its argument into a small interval and then
//! sums a power series there.  All of this happens in a [`Working`]
//! context, which carries extra digits and an unlimited exponent
//! range; the result is rounded into the caller's mode only at the
//! end.  Nothing here depends on binary floating point except the
//! initial guess of the square root, whose error is removed by a
//! fixed number of Newton steps, so results are the same on every
//! platform.
use std::cell::Cell;

use tracing::{event, Level};

use base::prelude::*;

use super::unit::ArithmeticUnit;

mod exponential;
mod hyperbolic;
mod power;
mod trig;

#[cfg(test)]
mod tests;

pub use trig::AngleMode;

/// Intermediate arithmetic for the transcendental functions.
///
/// Operations return plain values; any signal they raise is
/// remembered (the first one wins) and attached to the final result
/// by [`Working::finish`].
pub(crate) struct Working {
    unit: ArithmeticUnit,
    /// Used for argument reduction, where a multiple of a constant is
    /// subtracted from the argument.
    reduce: ArithmeticUnit,
    signal: Cell<Signal>,
}

impl Working {
    /// A context for the functions of `target`.
    pub(crate) fn new(target: &ArithmeticUnit) -> Working {
        Working::with_unit(target.working())
    }

    /// A context with more digits, for functions (such as powers)
    /// which magnify the error of their intermediate results.
    pub(crate) fn precise(target: &ArithmeticUnit) -> Working {
        Working::with_unit(target.reduction())
    }

    fn with_unit(unit: ArithmeticUnit) -> Working {
        Working {
            unit,
            reduce: ArithmeticUnit::new(PrecisionMode::widest()),
            signal: Cell::new(Signal::None),
        }
    }

    /// Number of digits carried.
    pub(crate) fn digits(&self) -> usize {
        self.unit.precision()
    }

    pub(crate) fn mode(&self) -> &PrecisionMode {
        self.unit.mode()
    }

    pub(crate) fn keep(&self, out: Outcome) -> Decimal {
        self.raise(out.signal);
        out.value
    }

    pub(crate) fn raise(&self, signal: Signal) {
        self.signal.set(self.signal.get().or(signal));
    }

    pub(crate) fn add(&self, a: &Decimal, b: &Decimal) -> Decimal {
        self.keep(self.unit.add(a, b))
    }

    pub(crate) fn sub(&self, a: &Decimal, b: &Decimal) -> Decimal {
        self.keep(self.unit.subtract(a, b))
    }

    pub(crate) fn mul(&self, a: &Decimal, b: &Decimal) -> Decimal {
        self.keep(self.unit.multiply(a, b))
    }

    pub(crate) fn div(&self, a: &Decimal, b: &Decimal) -> Decimal {
        self.keep(self.unit.divide(a, b))
    }

    pub(crate) fn sqr(&self, a: &Decimal) -> Decimal {
        self.mul(a, a)
    }

    pub(crate) fn int(&self, n: i64) -> Decimal {
        self.keep(self.unit.from_i64(n))
    }

    pub(crate) fn half(&self) -> Decimal {
        Decimal::round_digits(false, -1, &[5], self.mode()).value
    }

    /// Rounds a value computed by `reduce` to the working digits.
    pub(crate) fn narrowed(&self, x: &Decimal) -> Decimal {
        self.keep(x.rounded_to(self.mode()))
    }

    /// The most terms any series may take.  Every series used here
    /// converges at least one decimal digit per term, so this is
    /// only reached if something has gone wrong.
    fn term_limit(&self) -> usize {
        4 * self.digits() + 20
    }

    /// True when adding `term` to `sum` cannot change any of the
    /// working digits of the sum.
    fn negligible(&self, term: &Decimal, sum: &Decimal) -> bool {
        if !term.is_normal() {
            return true;
        }
        if !sum.is_normal() {
            return false;
        }
        i64::from(term.exponent()) < i64::from(sum.exponent()) - self.digits() as i64 - 1
    }

    /// Sums a power series.  `next` is given the previous term and
    /// the index `n` (starting at 1) of the term it should return.
    /// Running out of terms raises [`Signal::OutOfRange`] and yields
    /// the partial sum.
    pub(crate) fn series<F>(&self, first: Decimal, mut next: F) -> Decimal
    where
        F: FnMut(&Decimal, usize) -> Decimal,
    {
        let mut sum = first;
        let mut term = first;
        let limit = self.term_limit();
        for n in 1..=limit {
            term = next(&term, n);
            if self.negligible(&term, &sum) {
                event!(Level::TRACE, terms = n, "series converged");
                return sum;
            }
            sum = self.add(&sum, &term);
        }
        event!(Level::TRACE, terms = limit, "series did not converge");
        self.raise(Signal::OutOfRange);
        sum
    }

    /// Rounds `value` into the mode of `target`, attaching the first
    /// signal raised during the computation.
    pub(crate) fn finish(&self, target: &ArithmeticUnit, value: Decimal) -> Outcome {
        target.narrow(Outcome::signalled(value, self.signal.get()))
    }
}

/// Result of an argument whose exponent is so large that the
/// exponential function certainly overflows (or underflows) in every
/// mode.
pub(crate) fn exp_out_of_range(x: &Decimal) -> Option<Outcome> {
    if x.is_normal() && x.exponent() >= 7 {
        Some(if x.is_negative() {
            Outcome::signalled(Decimal::ZERO, Signal::Underflow)
        } else {
            Outcome::signalled(Decimal::INFINITY, Signal::Overflow)
        })
    } else {
        None
    }
}

/// True for integers whose units digit is odd.
pub(crate) fn is_odd_integer(x: &Decimal) -> bool {
    x.is_normal()
        && x.is_integer()
        && usize::try_from(x.exponent()).map_or(false, |units| x.digit(units) % 2 == 1)
}
