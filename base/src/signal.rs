//! Numeric exception signals.  Every arithmetic operation yields a
//! value together with a [`Signal`]; it is up to the caller to decide
//! whether a signal halts evaluation or is merely displayed.
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::decimal::Decimal;

/// Describes the numeric exception (if any) raised by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    None,
    Overflow,
    Underflow,
    DivideByZero,
    InvalidOperation,
    OutOfRange,
}

impl Signal {
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Signal::None)
    }

    /// Combines two signals, keeping the first one raised.  When an
    /// operation is built from several steps, the signal of the
    /// earliest failing step is the one reported.
    #[must_use]
    pub const fn or(self, later: Signal) -> Signal {
        match self {
            Signal::None => later,
            _ => self,
        }
    }

    #[must_use]
    pub const fn all_signals() -> [Signal; 6] {
        [
            Signal::None,
            Signal::Overflow,
            Signal::Underflow,
            Signal::DivideByZero,
            Signal::InvalidOperation,
            Signal::OutOfRange,
        ]
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        // These are the messages the calculator shows.
        f.write_str(match self {
            Signal::None => "OK",
            Signal::Overflow => "Out of Range (overflow)",
            Signal::Underflow => "Underflow",
            Signal::DivideByZero => "Divide by 0",
            Signal::InvalidOperation => "Invalid Data",
            Signal::OutOfRange => "Out of Range",
        })
    }
}

/// The result of an operation: a value and the signal which
/// accompanies it.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Outcome {
    pub value: Decimal,
    pub signal: Signal,
}

impl Outcome {
    pub const fn exact(value: Decimal) -> Outcome {
        Outcome {
            value,
            signal: Signal::None,
        }
    }

    pub const fn signalled(value: Decimal, signal: Signal) -> Outcome {
        Outcome { value, signal }
    }

    pub const fn into_parts(self) -> (Decimal, Signal) {
        (self.value, self.signal)
    }

    /// Replaces the signal unless one was already raised.
    pub const fn or_signal(self, signal: Signal) -> Outcome {
        Outcome {
            value: self.value,
            signal: self.signal.or(signal),
        }
    }
}

/// The result of comparing two values.  Comparisons involving NaN or
/// Error values are unordered; this is a distinct outcome rather than
/// being reported as "not equal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    Unordered,
}

impl Comparison {
    pub const fn to_ordering(self) -> Option<Ordering> {
        match self {
            Comparison::Less => Some(Ordering::Less),
            Comparison::Equal => Some(Ordering::Equal),
            Comparison::Greater => Some(Ordering::Greater),
            Comparison::Unordered => None,
        }
    }

    pub const fn reverse(self) -> Comparison {
        match self {
            Comparison::Less => Comparison::Greater,
            Comparison::Greater => Comparison::Less,
            other => other,
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ord: Ordering) -> Comparison {
        match ord {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

#[test]
fn test_signal_or_keeps_first() {
    assert_eq!(Signal::None.or(Signal::Overflow), Signal::Overflow);
    assert_eq!(
        Signal::DivideByZero.or(Signal::Overflow),
        Signal::DivideByZero
    );
    for s in Signal::all_signals() {
        assert_eq!(s.or(Signal::None), s);
    }
}

#[test]
fn test_comparison_reverse() {
    assert_eq!(Comparison::Less.reverse(), Comparison::Greater);
    assert_eq!(Comparison::Unordered.reverse(), Comparison::Unordered);
    assert_eq!(Comparison::Equal.to_ordering(), Some(Ordering::Equal));
    assert_eq!(Comparison::Unordered.to_ordering(), None);
}

#[test]
fn test_outcome_or_signal_keeps_first() {
    let out = Outcome::exact(Decimal::ONE).or_signal(Signal::Underflow);
    assert_eq!(out.signal, Signal::Underflow);
    let (value, signal) = Outcome::signalled(Decimal::INFINITY, Signal::Overflow)
        .or_signal(Signal::OutOfRange)
        .into_parts();
    assert!(value.is_identical(&Decimal::INFINITY));
    assert_eq!(signal, Signal::Overflow);
}
