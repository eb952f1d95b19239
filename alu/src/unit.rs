//! The arithmetic unit.
use base::prelude::*;

/// Extra digits carried by intermediate results of the
/// transcendental functions.
pub(crate) const WORKING_GUARD_DIGITS: usize = 6;

/// Further digits used when an argument is reduced by subtracting a
/// multiple of a constant (such as ln 10 or π/2), where cancellation
/// would otherwise eat into the working digits.
pub(crate) const REDUCTION_GUARD_DIGITS: usize = 12;

/// The arithmetic unit performs every operation on calculator
/// numbers.  It holds nothing but the precision mode, so it is cheap
/// to copy, and independent units (perhaps in different precision
/// modes) can be used from different threads without any
/// synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticUnit {
    mode: PrecisionMode,
}

impl ArithmeticUnit {
    #[must_use]
    pub fn new(mode: PrecisionMode) -> ArithmeticUnit {
        ArithmeticUnit { mode }
    }

    pub fn mode(&self) -> &PrecisionMode {
        &self.mode
    }

    /// Number of significant digits retained (P).
    pub fn precision(&self) -> usize {
        self.mode.digits()
    }

    /// A unit for intermediate results, with extra digits and an
    /// exponent range wide enough that bounded computations cannot
    /// overflow before their result is narrowed.
    pub(crate) fn working(&self) -> ArithmeticUnit {
        ArithmeticUnit::new(self.mode.widened(WORKING_GUARD_DIGITS))
    }

    /// A unit with even more digits, for argument reduction.
    pub(crate) fn reduction(&self) -> ArithmeticUnit {
        ArithmeticUnit::new(
            self.mode
                .widened(WORKING_GUARD_DIGITS + REDUCTION_GUARD_DIGITS),
        )
    }

    /// Rounds a result computed in a wider unit into this unit's
    /// mode, keeping any signal raised while computing it.
    pub(crate) fn narrow(&self, wide: Outcome) -> Outcome {
        let (value, signal) = wide.into_parts();
        let narrowed = value.rounded_to(&self.mode);
        Outcome::signalled(narrowed.value, signal).or_signal(narrowed.signal)
    }
}

impl Default for ArithmeticUnit {
    fn default() -> ArithmeticUnit {
        ArithmeticUnit::new(PrecisionMode::default())
    }
}

#[test]
fn test_narrow_keeps_the_earlier_signal() {
    let unit = ArithmeticUnit::new(PrecisionMode::HP42S);
    let huge = Decimal::power_of_ten(600);
    let out = unit.narrow(Outcome::exact(huge));
    assert!(out.value.is_identical(&Decimal::INFINITY));
    assert_eq!(out.signal, Signal::Overflow);
    let out = unit.narrow(Outcome::signalled(huge, Signal::DivideByZero));
    assert!(out.value.is_identical(&Decimal::INFINITY));
    assert_eq!(out.signal, Signal::DivideByZero);
    let third = Decimal::new(false, -1, &[3; 20], &PrecisionMode::EXTENDED)
        .expect("valid extended value");
    let out = unit.narrow(Outcome::exact(third));
    assert_eq!(out.value.significant_digits(), 12);
    assert_eq!(out.signal, Signal::None);
}
