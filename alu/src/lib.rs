//! This crate emulates the calculator's arithmetic unit: the four
//! basic operations, comparison and rounding, the transcendental
//! functions, and conversion between numbers and the text the
//! calculator displays.
//!
//! All operations are methods of [`ArithmeticUnit`], which carries
//! the precision mode.  Operations are pure; each returns an
//! [`Outcome`] holding the result and the numeric exception (if any)
//! which it raised.

mod arith;
mod constants;
mod digits;
mod display;
mod parse;
mod transcendental;
mod unit;

pub use base::prelude::{Class, Comparison, Decimal, Outcome, PrecisionMode, Signal};
pub use display::{DisplayMode, DisplaySettings, RadixMark};
pub use transcendental::AngleMode;
pub use unit::ArithmeticUnit;
