use super::*;
use crate::dec;

fn hp() -> PrecisionMode {
    PrecisionMode::HP42S
}

#[test]
fn test_new_validates() {
    let mode = hp();
    assert_eq!(Decimal::new(false, 0, &[], &mode), Err(DigitError::Empty));
    assert_eq!(
        Decimal::new(false, 0, &[1; 13], &mode),
        Err(DigitError::TooManyDigits {
            supplied: 13,
            precision: 12
        })
    );
    assert_eq!(
        Decimal::new(false, 0, &[1, 10], &mode),
        Err(DigitError::NotADigit {
            position: 1,
            value: 10
        })
    );
    assert_eq!(
        Decimal::new(false, 0, &[0, 1], &mode),
        Err(DigitError::NotNormalized)
    );
    assert_eq!(
        Decimal::new(false, 500, &[1], &mode),
        Err(DigitError::ExponentOutOfRange {
            exponent: 500,
            min: -499,
            max: 499
        })
    );
    let z = Decimal::new(true, 7, &[0, 0], &mode).expect("all-zero digits are a valid zero");
    assert!(z.is_zero());
    assert!(z.is_negative());
}

#[test]
fn test_digit_access() {
    let x = dec!(false, -2, [3, 1, 4]);
    assert_eq!(x.digit(0), 3);
    assert_eq!(x.digit(2), 4);
    assert_eq!(x.digit(3), 0);
    assert_eq!(x.digit(MAX_DIGITS + 5), 0);
    assert_eq!(x.significant_digits(), 3);
    assert_eq!(x.significant(), &[3, 1, 4]);
    assert_eq!(x.lsd_exponent(), -4);
    assert_eq!(Decimal::ZERO.significant_digits(), 0);
}

#[test]
fn test_round_digits_half_away_from_zero() {
    let mode = PrecisionMode::custom(3, -99, 99).expect("valid mode");
    // 1.235 -> 1.24
    let out = Decimal::round_digits(false, 0, &[1, 2, 3, 5], &mode);
    assert!(out.value.is_identical(&dec!(false, 0, [1, 2, 4])));
    assert_eq!(out.signal, Signal::None);
    // -1.235 -> -1.24 (away from zero, not towards +infinity)
    let out = Decimal::round_digits(true, 0, &[1, 2, 3, 5], &mode);
    assert!(out.value.is_identical(&dec!(true, 0, [1, 2, 4])));
    // 1.2349999 -> 1.23, only the first discarded digit counts.
    let out = Decimal::round_digits(false, 0, &[1, 2, 3, 4, 9, 9, 9], &mode);
    assert!(out.value.is_identical(&dec!(false, 0, [1, 2, 3])));
}

#[test]
fn test_round_digits_carry_out() {
    let mode = PrecisionMode::custom(3, -99, 99).expect("valid mode");
    let out = Decimal::round_digits(false, 0, &[9, 9, 9, 7], &mode);
    assert!(out.value.is_identical(&dec!(false, 1, [1])));
}

#[test]
fn test_round_digits_leading_zeros() {
    let out = Decimal::round_digits(false, 2, &[0, 0, 4, 2], &hp());
    assert!(out.value.is_identical(&dec!(false, 0, [4, 2])));
    let out = Decimal::round_digits(true, 2, &[0, 0, 0], &hp());
    assert!(out.value.is_identical(&Decimal::NEGATIVE_ZERO));
    assert_eq!(out.signal, Signal::None);
}

#[test]
fn test_round_digits_range() {
    let out = Decimal::round_digits(true, 500, &[1], &hp());
    assert!(out.value.is_identical(&Decimal::NEGATIVE_INFINITY));
    assert_eq!(out.signal, Signal::Overflow);
    let out = Decimal::round_digits(false, -500, &[1], &hp());
    assert!(out.value.is_identical(&Decimal::ZERO));
    assert_eq!(out.signal, Signal::Underflow);
    // Rounding can bring a value back into range.
    let out = Decimal::round_digits(false, -500, &[9; 14], &hp());
    assert!(out.value.is_identical(&Decimal::power_of_ten(-499)));
    assert_eq!(out.signal, Signal::None);
    // ... or push it out.
    let out = Decimal::round_digits(false, 499, &[9; 14], &hp());
    assert!(out.value.is_infinite());
    assert_eq!(out.signal, Signal::Overflow);
}

#[test]
fn test_rounded_to_narrower_mode() {
    let x = dec!(false, 0, [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 5, 1]);
    let out = x.rounded_to(&hp());
    assert!(out
        .value
        .is_identical(&dec!(false, 0, [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 3])));
    assert!(Decimal::NAN.rounded_to(&hp()).value.is_nan());
}

#[test]
fn test_compare_specials() {
    let one = Decimal::ONE;
    assert_eq!(Decimal::NAN.compare(&Decimal::NAN), Comparison::Unordered);
    assert_eq!(Decimal::ERROR.compare(&one), Comparison::Unordered);
    assert_eq!(one.compare(&Decimal::NAN), Comparison::Unordered);
    assert_eq!(Decimal::INFINITY.compare(&one), Comparison::Greater);
    assert_eq!(Decimal::NEGATIVE_INFINITY.compare(&one), Comparison::Less);
    assert_eq!(
        Decimal::NEGATIVE_INFINITY.compare(&one.negated()),
        Comparison::Less
    );
    assert_eq!(
        Decimal::INFINITY.compare(&Decimal::INFINITY),
        Comparison::Equal
    );
    assert_eq!(
        Decimal::INFINITY.compare(&Decimal::NEGATIVE_INFINITY),
        Comparison::Greater
    );
    assert!(Decimal::NAN != Decimal::NAN);
    assert!(Decimal::NAN.partial_cmp(&one).is_none());
}

#[test]
fn test_signed_zero() {
    assert_eq!(Decimal::ZERO, Decimal::NEGATIVE_ZERO);
    assert!(!Decimal::ZERO.is_identical(&Decimal::NEGATIVE_ZERO));
    assert_eq!(Decimal::ZERO.compare(&Decimal::ONE), Comparison::Less);
    assert_eq!(
        Decimal::NEGATIVE_ZERO.compare(&Decimal::ONE.negated()),
        Comparison::Greater
    );
}

#[test]
fn test_compare_normals() {
    let small = dec!(false, -3, [9, 9]);
    let big = dec!(false, 2, [1]);
    assert!(small < big);
    assert!(big.negated() < small.negated());
    assert!(dec!(false, 0, [1, 5]) > dec!(false, 0, [1, 4, 9, 9]));
    assert_eq!(dec!(false, 0, [1, 5]), dec!(false, 0, [1, 5]));
}

#[test]
fn test_negate_and_abs() {
    assert!(Decimal::NAN.negated().is_identical(&Decimal::NAN));
    assert!(Decimal::INFINITY.negated().is_identical(&Decimal::NEGATIVE_INFINITY));
    assert!(dec!(true, 0, [2]).abs().is_identical(&dec!(false, 0, [2])));
}

#[test]
fn test_is_integer() {
    assert!(dec!(false, 2, [1, 2, 3]).is_integer());
    assert!(!dec!(false, 1, [1, 2, 3]).is_integer());
    assert!(!dec!(false, -1, [5]).is_integer());
    assert!(Decimal::NEGATIVE_ZERO.is_integer());
    assert!(!Decimal::INFINITY.is_integer());
}

#[test]
fn test_canonical_text() {
    assert_eq!(dec!(true, 3, [1, 2, 5]).to_string(), "-1.25E3");
    assert_eq!(dec!(false, 0, [7]).to_string(), "7");
    assert_eq!(Decimal::NEGATIVE_ZERO.to_string(), "-0");
    assert_eq!(Decimal::NEGATIVE_INFINITY.to_string(), "-Infinity");
    assert_eq!(format!("{:?}", Decimal::NAN), "Decimal(NaN)");
}

mod proptests {
    use super::super::*;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Arbitrary)]
    struct SmallDecimal {
        negative: bool,
        #[strategy(-499..=499i32)]
        exponent: i32,
        #[strategy(1..=9u8)]
        lead: u8,
        #[strategy(proptest::collection::vec(0..=9u8, 0..11))]
        rest: Vec<u8>,
    }

    impl SmallDecimal {
        fn value(&self) -> Decimal {
            let mut digits = vec![self.lead];
            digits.extend_from_slice(&self.rest);
            Decimal::new(
                self.negative,
                self.exponent,
                &digits,
                &PrecisionMode::HP42S,
            )
            .expect("strategy generates valid decimals")
        }
    }

    #[proptest]
    fn comparison_is_antisymmetric(a: SmallDecimal, b: SmallDecimal) {
        let (a, b) = (a.value(), b.value());
        assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    #[proptest]
    fn rounding_valid_values_is_identity(a: SmallDecimal) {
        let a = a.value();
        let out = a.rounded_to(&PrecisionMode::HP42S);
        assert!(out.value.is_identical(&a));
        assert_eq!(out.signal, Signal::None);
    }

    #[proptest]
    fn negation_reverses_order(a: SmallDecimal, b: SmallDecimal) {
        let (a, b) = (a.value(), b.value());
        assert_eq!(a.compare(&b), b.negated().compare(&a.negated()));
    }
}
