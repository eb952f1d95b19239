//! The `base` crate defines the decimal number representation which
//! is shared by the arithmetic unit and by the state-file codec.  The
//! idea is that if you want to write a tool which only reads or
//! writes calculator state, it would depend on the base crate but
//! would not need to depend on the arithmetic library itself.

mod decimal;
mod float;
mod precision;
mod signal;

pub mod error;
pub mod prelude;

pub use crate::decimal::{Class, Decimal, MAX_DIGITS};
pub use crate::precision::{PrecisionMode, MAX_MODE_DIGITS};
pub use crate::signal::{Comparison, Outcome, Signal};

/// Builds a [`Decimal`] from a sign, exponent and digit list which
/// are known to be valid at compile time.  Panics (in tests, where
/// this is mostly used) if they are not.
#[macro_export]
macro_rules! dec {
    ($neg:expr, $exp:expr, [$($d:expr),+ $(,)?]) => {
        $crate::prelude::Decimal::new(
            $neg,
            $exp,
            &[$($d),+],
            &$crate::prelude::PrecisionMode::EXTENDED,
        )
        .expect("dec! arguments should describe a valid decimal")
    };
}

#[test]
fn test_dec_macro() {
    let x = dec!(true, 2, [1, 2, 5]);
    assert!(x.is_negative());
    assert_eq!(x.exponent(), 2);
    assert_eq!(x.digit(0), 1);
    assert_eq!(x.digit(1), 2);
    assert_eq!(x.digit(2), 5);
    assert_eq!(x.digit(3), 0);
}
