//! The prelude exports the types which are needed to work with
//! calculator numbers.  Providing this prelude is the main purpose of
//! the base crate.
pub use super::decimal::{Class, Decimal, MAX_DIGITS};
pub use super::error::*;
pub use super::precision::{PrecisionMode, MAX_MODE_DIGITS};
pub use super::signal::{Comparison, Outcome, Signal};
pub use super::dec;
