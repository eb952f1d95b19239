//! Conversions between [`Decimal`] and binary doubles.  State files
//! written before the calculator switched to decimal arithmetic hold
//! their numbers as IEEE 754 doubles, so the codec needs these.
//!
//! A double is converted through its shortest round-trip decimal text
//! (which is what Rust's `{:e}` formatting produces), so a double
//! which was itself produced from a short decimal (such as 0.1) comes
//! back as exactly that decimal.
use super::decimal::{Class, Decimal, MAX_DIGITS};
use super::precision::PrecisionMode;
use super::signal::Outcome;

impl Decimal {
    pub fn from_f64(x: f64, mode: &PrecisionMode) -> Outcome {
        if x.is_nan() {
            return Outcome::exact(Decimal::NAN);
        }
        if x.is_infinite() {
            return Outcome::exact(Decimal::infinity(x.is_sign_negative()));
        }
        if x == 0.0 {
            return Outcome::exact(Decimal::zero(x.is_sign_negative()));
        }
        // Produces text such as "-1.25e-7".
        let text = format!("{:e}", x.abs());
        let (mantissa, exponent) = match text.split_once('e') {
            Some(parts) => parts,
            None => (text.as_str(), "0"),
        };
        let exponent: i64 = exponent.parse().unwrap_or(0);
        let mut digits = [0_u8; MAX_DIGITS];
        let mut n = 0;
        for ch in mantissa.chars() {
            if let Some(d) = ch.to_digit(10) {
                // A double never needs more than 17 significant digits.
                if n < MAX_DIGITS {
                    digits[n] = d as u8;
                    n += 1;
                }
            }
        }
        Decimal::round_digits(x.is_sign_negative(), exponent, &digits[..n], mode)
    }

    /// Converts to the nearest double.  NaN and Error both become a
    /// NaN.
    pub fn to_f64(&self) -> f64 {
        match self.class() {
            Class::NaN | Class::Error => f64::NAN,
            Class::Infinity if self.is_negative() => f64::NEG_INFINITY,
            Class::Infinity => f64::INFINITY,
            Class::Zero if self.is_negative() => -0.0,
            Class::Zero => 0.0,
            // The canonical text form is accepted by the standard
            // library's parser, which rounds correctly.
            Class::Normal => self.to_string().parse().unwrap_or(f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Signal;
    use super::*;

    #[test]
    fn test_short_decimals_survive() {
        let mode = PrecisionMode::HP42S;
        let x = Decimal::from_f64(0.1, &mode).value;
        assert!(x.is_identical(&crate::dec!(false, -1, [1])));
        let x = Decimal::from_f64(-2.5, &mode).value;
        assert!(x.is_identical(&crate::dec!(true, 0, [2, 5])));
        let x = Decimal::from_f64(1234.0, &mode).value;
        assert!(x.is_identical(&crate::dec!(false, 3, [1, 2, 3, 4])));
    }

    #[test]
    fn test_long_double_is_rounded_to_mode() {
        let x = Decimal::from_f64(1.0 / 3.0, &PrecisionMode::HP42S).value;
        assert_eq!(x.significant_digits(), 12);
        assert!(x
            .significant()
            .iter()
            .all(|d| *d == 3));
        assert_eq!(x.exponent(), -1);
    }

    #[test]
    fn test_specials() {
        let mode = PrecisionMode::HP42S;
        assert_eq!(Decimal::from_f64(f64::NAN, &mode).value.class(), Class::NaN);
        let inf = Decimal::from_f64(f64::NEG_INFINITY, &mode).value;
        assert!(inf.is_infinite() && inf.is_negative());
        let z = Decimal::from_f64(-0.0, &mode).value;
        assert!(z.is_zero() && z.is_negative());
        assert!(Decimal::ERROR.to_f64().is_nan());
    }

    #[test]
    fn test_double_out_of_extended_range() {
        let mode = PrecisionMode::custom(12, -99, 99).expect("valid mode");
        let out = Decimal::from_f64(1e200, &mode);
        assert!(out.value.is_infinite());
        assert_eq!(out.signal, Signal::Overflow);
        let out = Decimal::from_f64(1e-200, &mode);
        assert!(out.value.is_zero());
        assert_eq!(out.signal, Signal::Underflow);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(crate::dec!(true, -3, [1, 2, 5]).to_f64(), -0.00125);
        assert_eq!(Decimal::ONE.to_f64(), 1.0);
        assert_eq!(Decimal::NEGATIVE_INFINITY.to_f64(), f64::NEG_INFINITY);
    }
}
