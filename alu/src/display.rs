//! Formatting numbers the way the calculator displays them.
//!
//! The display modes are those of the calculator's DISP menu: FIX,
//! SCI and ENG each take a digit count, while ALL shows every
//! significant digit.  In FIX mode a number which is too large to
//! show (or so small that it would show as zero) is displayed in SCI
//! mode instead.
use std::fmt::Write;

use serde::Serialize;

use base::prelude::*;

use super::parse::EXPONENT_GLYPH;
use super::unit::ArithmeticUnit;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayMode {
    Fixed,
    Scientific,
    Engineering,
    All,
}

/// Which character separates the integer and fractional parts.  The
/// other one is used for digit grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RadixMark {
    Period,
    Comma,
}

impl RadixMark {
    const fn mark(self) -> char {
        match self {
            RadixMark::Period => '.',
            RadixMark::Comma => ',',
        }
    }

    const fn separator(self) -> char {
        match self {
            RadixMark::Period => ',',
            RadixMark::Comma => '.',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplaySettings {
    pub mode: DisplayMode,
    /// The digit count of FIX, SCI and ENG.  Values larger than one
    /// less than the precision behave like that.
    pub digits: usize,
    pub radix: RadixMark,
    pub grouping: bool,
}

impl DisplaySettings {
    #[must_use]
    pub const fn new(mode: DisplayMode, digits: usize) -> DisplaySettings {
        DisplaySettings {
            mode,
            digits,
            radix: RadixMark::Period,
            grouping: false,
        }
    }

    #[must_use]
    pub const fn fixed(digits: usize) -> DisplaySettings {
        DisplaySettings::new(DisplayMode::Fixed, digits)
    }

    #[must_use]
    pub const fn scientific(digits: usize) -> DisplaySettings {
        DisplaySettings::new(DisplayMode::Scientific, digits)
    }

    #[must_use]
    pub const fn engineering(digits: usize) -> DisplaySettings {
        DisplaySettings::new(DisplayMode::Engineering, digits)
    }

    #[must_use]
    pub const fn all() -> DisplaySettings {
        DisplaySettings::new(DisplayMode::All, 0)
    }

    #[must_use]
    pub const fn with_radix(self, radix: RadixMark) -> DisplaySettings {
        DisplaySettings { radix, ..self }
    }

    #[must_use]
    pub const fn with_grouping(self, grouping: bool) -> DisplaySettings {
        DisplaySettings { grouping, ..self }
    }
}

impl Default for DisplaySettings {
    /// FIX 4, which is how the calculator starts out.
    fn default() -> DisplaySettings {
        DisplaySettings::fixed(4)
    }
}

/// How a Zero or Normal value is to be laid out.
#[derive(Debug)]
enum Layout {
    /// Positional notation with `decimals` digits after the radix
    /// mark.
    Positional {
        value: Decimal,
        decimals: usize,
        radix: bool,
    },
    /// A mantissa with `whole` digits before the radix mark and
    /// `decimals` after it, then the exponent.
    Exponent {
        value: Decimal,
        whole: usize,
        decimals: usize,
        exponent: i64,
        radix: bool,
    },
}

/// The digit of `x` whose weight is `10^power`.
fn digit_at(x: &Decimal, power: i64) -> u8 {
    let index = i64::from(x.exponent()) - power;
    if index < 0 || x.is_zero() {
        0
    } else {
        // Digits beyond the storage read as zero.
        usize::try_from(index).map_or(0, |i| x.digit(i))
    }
}

fn digit_char(d: u8) -> char {
    char::from(b'0' + d)
}

impl ArithmeticUnit {
    fn display_digits(&self, settings: &DisplaySettings) -> usize {
        settings.digits.min(self.precision() - 1)
    }

    /// Rounding for display takes place with an unlimited exponent
    /// range, so a value near the top of the range which rounds up
    /// still shows digits rather than turning into an infinity.
    fn display_unit(&self) -> ArithmeticUnit {
        ArithmeticUnit::new(self.mode().widened(0))
    }

    fn exponent_layout(&self, x: &Decimal, digits: usize, engineering: bool) -> Layout {
        if x.is_zero() {
            return Layout::Exponent {
                value: *x,
                whole: 1,
                decimals: digits,
                exponent: 0,
                radix: true,
            };
        }
        let value = self.display_unit().round_significant(x, digits + 1).value;
        let exponent = i64::from(value.exponent());
        let shift = if engineering {
            exponent.rem_euclid(3) as usize
        } else {
            0
        };
        Layout::Exponent {
            value,
            whole: shift + 1,
            decimals: digits.saturating_sub(shift),
            exponent: exponent - shift as i64,
            radix: true,
        }
    }

    fn fixed_layout(&self, x: &Decimal, digits: usize) -> Layout {
        if x.is_zero() {
            return Layout::Positional {
                value: *x,
                decimals: digits,
                radix: true,
            };
        }
        let p = self.precision() as i64;
        let mut exponent = i64::from(x.exponent());
        // Rounding can carry into a new leading digit, which may then
        // leave room for one decimal fewer; the second pass settles it.
        for _ in 0..2 {
            if exponent >= p {
                break;
            }
            let decimals = (digits as i64).min(p - 1 - exponent);
            // 0 <= decimals < P.
            let value = self.display_unit().round_places(x, decimals as i32).value;
            if value.is_zero() {
                break;
            }
            if i64::from(value.exponent()) == exponent {
                return Layout::Positional {
                    value,
                    decimals: decimals as usize,
                    radix: true,
                };
            }
            exponent = value.exponent().into();
        }
        self.exponent_layout(x, digits, false)
    }

    fn all_layout(&self, x: &Decimal) -> Layout {
        if x.is_zero() {
            return Layout::Positional {
                value: *x,
                decimals: 0,
                radix: false,
            };
        }
        let value = x.rounded_to(self.display_unit().mode()).value;
        let p = self.precision() as i64;
        let exponent = i64::from(value.exponent());
        let fraction = value.significant_digits() as i64 - 1 - exponent;
        if exponent < p && fraction <= p - 1 {
            Layout::Positional {
                value,
                decimals: fraction.max(0) as usize,
                radix: false,
            }
        } else {
            Layout::Exponent {
                value,
                whole: 1,
                decimals: value.significant_digits() - 1,
                exponent,
                radix: false,
            }
        }
    }

    fn layout(&self, x: &Decimal, settings: &DisplaySettings) -> Layout {
        let digits = self.display_digits(settings);
        match settings.mode {
            DisplayMode::Fixed => self.fixed_layout(x, digits),
            DisplayMode::Scientific => self.exponent_layout(x, digits, false),
            DisplayMode::Engineering => self.exponent_layout(x, digits, true),
            DisplayMode::All => self.all_layout(x),
        }
    }

    /// Formats `x` as the calculator would display it.
    pub fn format(&self, x: &Decimal, settings: &DisplaySettings) -> String {
        let mut out = String::new();
        match x.class() {
            Class::NaN => return "<Not a Number>".to_string(),
            Class::Error => return "<Error>".to_string(),
            Class::Infinity => {
                return if x.is_negative() {
                    "-Infinity".to_string()
                } else {
                    "Infinity".to_string()
                };
            }
            Class::Zero | Class::Normal => (),
        }
        if x.is_negative() {
            out.push('-');
        }
        let mark = settings.radix.mark();
        match self.layout(x, settings) {
            Layout::Positional {
                value,
                decimals,
                radix,
            } => {
                let top = i64::from(value.exponent()).max(0);
                for power in (0..=top).rev() {
                    out.push(digit_char(digit_at(&value, power)));
                    if settings.grouping && power > 0 && power % 3 == 0 {
                        out.push(settings.radix.separator());
                    }
                }
                if radix || decimals > 0 {
                    out.push(mark);
                }
                for power in 1..=decimals as i64 {
                    out.push(digit_char(digit_at(&value, -power)));
                }
            }
            Layout::Exponent {
                value,
                whole,
                decimals,
                exponent,
                radix,
            } => {
                let digit = |i: usize| {
                    if value.is_zero() {
                        '0'
                    } else {
                        digit_char(value.digit(i))
                    }
                };
                out.extend((0..whole).map(digit));
                if radix || decimals > 0 {
                    out.push(mark);
                }
                out.extend((whole..whole + decimals).map(digit));
                out.push(EXPONENT_GLYPH);
                // Writing to a String cannot fail.
                let _ = write!(out, "{exponent}");
            }
        }
        out
    }

    /// Rounds `x` to the digits that `settings` would display (the
    /// calculator's RND).  In ALL mode the value is unchanged.
    pub fn round_for_display(&self, x: &Decimal, settings: &DisplaySettings) -> Outcome {
        if !x.is_normal() {
            return Outcome::exact(*x);
        }
        let digits = self.display_digits(settings);
        match (settings.mode, self.layout(x, settings)) {
            (DisplayMode::All, _) => x.rounded_to(self.mode()),
            (_, Layout::Positional { decimals, .. }) => {
                self.round_places(x, decimals as i32)
            }
            (_, Layout::Exponent { .. }) => self.round_significant(x, digits + 1),
        }
    }
}
