use base::prelude::*;

use super::super::unit::ArithmeticUnit;
use super::{DisplayMode, DisplaySettings, RadixMark};

fn hp() -> ArithmeticUnit {
    ArithmeticUnit::new(PrecisionMode::HP42S)
}

fn show(text: &str, settings: DisplaySettings) -> String {
    let unit = hp();
    let x = unit.parse(text).value;
    unit.format(&x, &settings)
}

#[test]
fn test_fixed() {
    assert_eq!(show("3.14159265359", DisplaySettings::fixed(4)), "3.1416");
    assert_eq!(show("3", DisplaySettings::fixed(0)), "3.");
    assert_eq!(show("-2.5", DisplaySettings::fixed(0)), "-3.");
    assert_eq!(show("0.666666666667", DisplaySettings::fixed(4)), "0.6667");
    assert_eq!(
        show("0.666666666667", DisplaySettings::fixed(11)),
        "0.66666666667"
    );
    assert_eq!(show("1234.5", DisplaySettings::fixed(2)), "1234.50");
}

#[test]
fn test_fixed_limits_significant_digits() {
    assert_eq!(
        show("123456789.123", DisplaySettings::fixed(4)),
        "123456789.123"
    );
    assert_eq!(
        show("123456789012", DisplaySettings::fixed(4)),
        "123456789012."
    );
}

#[test]
fn test_fixed_rounding_carries() {
    assert_eq!(show("9.99999", DisplaySettings::fixed(4)), "10.0000");
    assert_eq!(
        show("99999999999.9", DisplaySettings::fixed(0)),
        "100000000000."
    );
}

#[test]
fn test_fixed_falls_back_to_scientific() {
    assert_eq!(show("0.00001", DisplaySettings::fixed(4)), "1.0000\u{1D07}-5");
    assert_eq!(show("-0.00001", DisplaySettings::fixed(4)), "-1.0000\u{1D07}-5");
    assert_eq!(show("1e12", DisplaySettings::fixed(4)), "1.0000\u{1D07}12");
}

#[test]
fn test_scientific() {
    assert_eq!(show("12345", DisplaySettings::scientific(3)), "1.235\u{1D07}4");
    assert_eq!(show("12345", DisplaySettings::scientific(0)), "1.\u{1D07}4");
    assert_eq!(show("-0.0025", DisplaySettings::scientific(2)), "-2.50\u{1D07}-3");
    assert_eq!(show("0", DisplaySettings::scientific(2)), "0.00\u{1D07}0");
    // Display rounding is not limited by the exponent range.
    assert_eq!(
        show("9.99999999999e499", DisplaySettings::scientific(4)),
        "1.0000\u{1D07}500"
    );
}

#[test]
fn test_engineering() {
    assert_eq!(show("12345", DisplaySettings::engineering(2)), "12.3\u{1D07}3");
    assert_eq!(
        show("0.00012345", DisplaySettings::engineering(2)),
        "123.\u{1D07}-6"
    );
    assert_eq!(show("1", DisplaySettings::engineering(3)), "1.000\u{1D07}0");
    assert_eq!(show("999.96", DisplaySettings::engineering(3)), "1.000\u{1D07}3");
}

#[test]
fn test_all() {
    assert_eq!(show("1234.5", DisplaySettings::all()), "1234.5");
    assert_eq!(show("0.5", DisplaySettings::all()), "0.5");
    assert_eq!(show("100", DisplaySettings::all()), "100");
    assert_eq!(show("1e-11", DisplaySettings::all()), "0.00000000001");
    assert_eq!(show("1.2e-11", DisplaySettings::all()), "1.2\u{1D07}-11");
    assert_eq!(show("1e12", DisplaySettings::all()), "1\u{1D07}12");
    assert_eq!(show("0", DisplaySettings::all()), "0");
}

#[test]
fn test_signed_zero_and_specials() {
    assert_eq!(show("-0", DisplaySettings::fixed(2)), "-0.00");
    assert_eq!(show("Infinity", DisplaySettings::fixed(2)), "Infinity");
    assert_eq!(show("-Infinity", DisplaySettings::all()), "-Infinity");
    assert_eq!(show("abc", DisplaySettings::fixed(2)), "<Not a Number>");
    assert_eq!(
        hp().format(&Decimal::ERROR, &DisplaySettings::default()),
        "<Error>"
    );
}

#[test]
fn test_radix_and_grouping() {
    let settings = DisplaySettings::fixed(2).with_grouping(true);
    assert_eq!(show("1234567.891", settings), "1,234,567.89");
    assert_eq!(show("123.4", settings), "123.40");
    let settings = settings.with_radix(RadixMark::Comma);
    assert_eq!(show("1234567.891", settings), "1.234.567,89");
    assert_eq!(
        show("2.5", DisplaySettings::fixed(1).with_radix(RadixMark::Comma)),
        "2,5"
    );
}

#[test]
fn test_digits_clamped_to_precision() {
    let settings = DisplaySettings::new(DisplayMode::Scientific, 40);
    assert_eq!(show("2", settings), "2.00000000000\u{1D07}0");
}

#[test]
fn test_round_for_display() {
    let unit = hp();
    let x = unit.parse("3.14159265359").value;
    let out = unit.round_for_display(&x, &DisplaySettings::fixed(2));
    assert!(out.value.is_identical(&dec!(false, 0, [3, 1, 4])));
    let out = unit.round_for_display(&x, &DisplaySettings::scientific(2));
    assert!(out.value.is_identical(&dec!(false, 0, [3, 1, 4])));
    let out = unit.round_for_display(&x, &DisplaySettings::all());
    assert!(out.value.is_identical(&x));
    let tiny = unit.parse("0.000012345").value;
    let out = unit.round_for_display(&tiny, &DisplaySettings::fixed(2));
    assert!(out.value.is_identical(&dec!(false, -5, [1, 2, 3])));
}

mod proptests {
    use base::prelude::*;
    use test_strategy::{proptest, Arbitrary};

    use super::super::super::unit::ArithmeticUnit;
    use super::super::DisplaySettings;

    /// A value whose FIX 4 display is positional.
    #[derive(Debug, Arbitrary)]
    struct Displayable {
        negative: bool,
        #[strategy(-3..=6i32)]
        exponent: i32,
        #[strategy(1..=9u8)]
        lead: u8,
        #[strategy(proptest::collection::vec(0..=9u8, 0..12))]
        rest: Vec<u8>,
    }

    #[proptest]
    fn fixed_display_parses_back_to_rounded_value(x: Displayable) {
        let unit = ArithmeticUnit::new(PrecisionMode::HP42S);
        let mut digits = vec![x.lead];
        digits.extend_from_slice(&x.rest);
        let value = Decimal::round_digits(x.negative, x.exponent.into(), &digits, unit.mode()).value;
        let text = unit.format(&value, &DisplaySettings::fixed(4));
        let parsed = unit.parse(&text);
        assert_eq!(parsed.signal, Signal::None);
        let rounded = unit.round_places(&value, 4).value;
        assert!(
            parsed.value.is_identical(&rounded),
            "{value} displayed as {text:?} parsed as {} not {rounded}",
            parsed.value
        );
    }
}
