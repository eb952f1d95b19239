use base::prelude::*;

use super::super::unit::ArithmeticUnit;
use super::{AngleMode, Working};

fn hp() -> ArithmeticUnit {
    ArithmeticUnit::new(PrecisionMode::HP42S)
}

fn num(unit: &ArithmeticUnit, text: &str) -> Decimal {
    let out = unit.parse(text);
    assert_eq!(out.signal, Signal::None, "{text:?} should parse cleanly");
    out.value
}

#[track_caller]
fn check(out: Outcome, expected: &str) {
    let unit = hp();
    let expected = num(&unit, expected);
    assert!(
        out.value.is_identical(&expected),
        "got {}, expected {expected}",
        out.value
    );
    assert_eq!(out.signal, Signal::None);
}

#[track_caller]
fn check_signal(out: Outcome, value: Decimal, signal: Signal) {
    assert!(
        out.value.is_identical(&value) || (out.value.is_nan() && value.is_nan()),
        "got {}, expected {value}",
        out.value
    );
    assert_eq!(out.signal, signal);
}

#[test]
fn test_exp() {
    let u = hp();
    check(u.exp(&num(&u, "1")), "2.71828182846");
    check(u.exp(&num(&u, "-1")), "0.367879441171");
    check(u.exp(&num(&u, "10")), "22026.4657948");
    check(u.exp(&num(&u, "0.001")), "1.00100050017");
    check(u.exp(&Decimal::ZERO), "1");
    check(u.exp(&Decimal::NEGATIVE_INFINITY), "0");
    check(u.exp(&num(&u, "-1000")), "5.07595889755e-435");
}

#[test]
fn test_exp_range() {
    let u = hp();
    check_signal(u.exp(&num(&u, "1200")), Decimal::INFINITY, Signal::Overflow);
    check_signal(u.exp(&num(&u, "-1200")), Decimal::ZERO, Signal::Underflow);
    check_signal(u.exp(&num(&u, "1e50")), Decimal::INFINITY, Signal::Overflow);
    check_signal(u.exp(&num(&u, "-1e50")), Decimal::ZERO, Signal::Underflow);
}

#[test]
fn test_exp_extended() {
    let u = ArithmeticUnit::new(PrecisionMode::EXTENDED);
    let out = u.exp(&Decimal::ONE);
    assert!(out
        .value
        .is_identical(&num(&u, "2.718281828459045235360287471352662")));
    assert_eq!(out.signal, Signal::None);
}

#[test]
fn test_logarithms() {
    let u = hp();
    check(u.ln(&num(&u, "2")), "0.69314718056");
    check(u.ln(&num(&u, "10")), "2.30258509299");
    check(u.ln(&num(&u, "0.5")), "-0.69314718056");
    check(u.ln(&num(&u, "1e100")), "230.258509299");
    check(u.ln(&num(&u, "1")), "0");
    check(u.ln(&num(&u, "1.000001")), "9.99999500000e-7");
    check(u.log10(&num(&u, "1000")), "3");
    check(u.log10(&num(&u, "1e-250")), "-250");
    check(u.log10(&num(&u, "2")), "0.301029995664");
    check(u.ln(&Decimal::INFINITY), "Infinity");
}

#[test]
fn test_logarithm_domain() {
    let u = hp();
    for x in [Decimal::ZERO, Decimal::NEGATIVE_ZERO, num(&u, "-1"), Decimal::NEGATIVE_INFINITY] {
        check_signal(u.ln(&x), Decimal::NAN, Signal::InvalidOperation);
        check_signal(u.log10(&x), Decimal::NAN, Signal::InvalidOperation);
    }
    check_signal(u.ln1p(&num(&u, "-1")), Decimal::NAN, Signal::InvalidOperation);
    check_signal(u.ln1p(&num(&u, "-2")), Decimal::NAN, Signal::InvalidOperation);
}

#[test]
fn test_exp10() {
    let u = hp();
    check(u.exp10(&num(&u, "2")), "100");
    check(u.exp10(&num(&u, "-3")), "0.001");
    check(u.exp10(&num(&u, "0.5")), "3.16227766017");
    check_signal(u.exp10(&num(&u, "500")), Decimal::INFINITY, Signal::Overflow);
    check_signal(u.exp10(&num(&u, "-500")), Decimal::ZERO, Signal::Underflow);
}

#[test]
fn test_small_argument_forms() {
    let u = hp();
    check(u.expm1(&num(&u, "1e-20")), "1e-20");
    check(u.ln1p(&num(&u, "1e-20")), "1e-20");
    check(u.expm1(&num(&u, "0.001")), "1.00050016671e-3");
    check(u.ln1p(&num(&u, "0.001")), "9.99500333084e-4");
    check(u.expm1(&num(&u, "1")), "1.71828182846");
    check(u.expm1(&num(&u, "-1e20")), "-1");
    check(u.ln1p(&num(&u, "1")), "0.69314718056");
}

#[test]
fn test_sqrt() {
    let u = hp();
    check(u.sqrt(&num(&u, "2")), "1.41421356237");
    check(u.sqrt(&num(&u, "16")), "4");
    check(u.sqrt(&num(&u, "1e-10")), "1e-5");
    check(u.sqrt(&num(&u, "1e11")), "316227.766017");
    check(u.sqrt(&num(&u, "0.25")), "0.5");
    assert!(u.sqrt(&Decimal::NEGATIVE_ZERO).value.is_identical(&Decimal::NEGATIVE_ZERO));
    check_signal(u.sqrt(&num(&u, "-4")), Decimal::NAN, Signal::InvalidOperation);
}

#[test]
fn test_pow() {
    let u = hp();
    check(u.pow(&num(&u, "2"), &num(&u, "10")), "1024");
    check(u.pow(&num(&u, "2"), &num(&u, "0.5")), "1.41421356237");
    check(u.pow(&num(&u, "-2"), &num(&u, "3")), "-8");
    check(u.pow(&num(&u, "-2"), &num(&u, "-2")), "0.25");
    check(u.pow(&num(&u, "10"), &num(&u, "-2")), "0.01");
    check(u.pow(&num(&u, "1.5"), &num(&u, "20")), "3325.25673008");
    check(u.pow(&num(&u, "5"), &Decimal::ZERO), "1");
    check(u.pow(&Decimal::ZERO, &num(&u, "3")), "0");
}

#[test]
fn test_large_integer_powers() {
    let u = hp();
    check(
        u.pow(&num(&u, "1.000000001"), &num(&u, "1000000000")),
        "2.71828182710",
    );
    check(
        u.pow(&num(&u, "1.0000001"), &num(&u, "2147483647")),
        "1.83664458940e93",
    );
    check(
        u.pow(&num(&u, "1.000000001"), &num(&u, "-1000000000")),
        "0.367879441355",
    );
}

#[test]
fn test_pow_special_cases() {
    let u = hp();
    check_signal(
        u.pow(&Decimal::ZERO, &Decimal::ZERO),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
    check_signal(
        u.pow(&Decimal::ZERO, &num(&u, "-1")),
        Decimal::INFINITY,
        Signal::DivideByZero,
    );
    check_signal(
        u.pow(&num(&u, "-8"), &num(&u, "0.5")),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
    check_signal(
        u.pow(&num(&u, "1e300"), &num(&u, "2")),
        Decimal::INFINITY,
        Signal::Overflow,
    );
    check_signal(
        u.pow(&num(&u, "1e300"), &num(&u, "-2")),
        Decimal::ZERO,
        Signal::Underflow,
    );
    check_signal(
        u.pow(&num(&u, "10"), &num(&u, "1e30")),
        Decimal::INFINITY,
        Signal::Overflow,
    );
    check(u.pow(&num(&u, "0.5"), &Decimal::INFINITY), "0");
    check(u.pow(&num(&u, "2"), &Decimal::INFINITY), "Infinity");
    check(u.pow(&Decimal::NEGATIVE_INFINITY, &num(&u, "3")), "-Infinity");
}

#[test]
fn test_root() {
    let u = hp();
    check(u.root(&num(&u, "8"), &num(&u, "3")), "2");
    check(u.root(&num(&u, "-8"), &num(&u, "3")), "-2");
    check(u.root(&num(&u, "2"), &num(&u, "2")), "1.41421356237");
    check(u.root(&num(&u, "0.0001"), &num(&u, "-2")), "100");
    check_signal(
        u.root(&num(&u, "-8"), &num(&u, "2")),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
    check_signal(
        u.root(&num(&u, "8"), &Decimal::ZERO),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
}

#[test]
fn test_trig_degrees() {
    let u = hp();
    let deg = AngleMode::Degrees;
    check(u.sin(&num(&u, "30"), deg), "0.5");
    check(u.sin(&num(&u, "-30"), deg), "-0.5");
    check(u.sin(&num(&u, "390"), deg), "0.5");
    check(u.cos(&num(&u, "60"), deg), "0.5");
    check(u.tan(&num(&u, "45"), deg), "1");
    check(u.tan(&num(&u, "-45"), deg), "-1");
    check(u.sin(&num(&u, "1e-5"), deg), "1.74532925199e-7");
}

#[test]
fn test_trig_exact_quarter_turns() {
    let u = hp();
    let deg = AngleMode::Degrees;
    for (angle, sin, cos) in [
        ("90", "1", "0"),
        ("180", "0", "-1"),
        ("270", "-1", "0"),
        ("-90", "-1", "0"),
        ("720", "0", "1"),
        ("-180", "0", "-1"),
    ] {
        let x = num(&u, angle);
        let s = u.sin(&x, deg);
        assert!(s.value.is_identical(&num(&u, sin)), "sin {angle} = {}", s.value);
        let c = u.cos(&x, deg);
        assert!(c.value.is_identical(&num(&u, cos)), "cos {angle} = {}", c.value);
    }
    check(u.sin(&num(&u, "200"), AngleMode::Gradians), "0");
    check(u.sin(&num(&u, "100"), AngleMode::Gradians), "1");
    check(u.cos(&num(&u, "50"), AngleMode::Gradians), "0.707106781187");
}

#[test]
fn test_tan_poles() {
    let u = hp();
    check_signal(
        u.tan(&num(&u, "90"), AngleMode::Degrees),
        Decimal::INFINITY,
        Signal::OutOfRange,
    );
    check_signal(
        u.tan(&num(&u, "-300"), AngleMode::Gradians),
        Decimal::INFINITY,
        Signal::OutOfRange,
    );
}

#[test]
fn test_trig_radians() {
    let u = hp();
    let rad = AngleMode::Radians;
    check(u.sin(&num(&u, "1"), rad), "0.841470984808");
    check(u.cos(&num(&u, "1"), rad), "0.540302305868");
    check(u.tan(&num(&u, "1"), rad), "1.55740772465");
    check(u.sin(&num(&u, "3.14159265359"), rad), "-2.06761537357e-13");
    check(u.sin(&num(&u, "100"), rad), "-0.50636564111");
    check(u.sin(&num(&u, "1e20"), rad), "-0.645251285266");
    check_signal(u.sin(&num(&u, "1e50"), rad), Decimal::NAN, Signal::OutOfRange);
    check_signal(
        u.cos(&Decimal::INFINITY, rad),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
}

#[test]
fn test_inverse_trig() {
    let u = hp();
    let deg = AngleMode::Degrees;
    check(u.atan(&num(&u, "1"), deg), "45");
    check(u.atan(&num(&u, "-1"), deg), "-45");
    check(u.atan(&Decimal::INFINITY, deg), "90");
    check(u.atan(&num(&u, "1"), AngleMode::Radians), "0.785398163397");
    check(u.atan(&num(&u, "10"), AngleMode::Radians), "1.4711276743");
    check(u.asin(&num(&u, "0.5"), deg), "30");
    check(u.asin(&num(&u, "-1"), deg), "-90");
    check(u.acos(&num(&u, "0.5"), deg), "60");
    check(u.acos(&num(&u, "-1"), deg), "180");
    check(u.acos(&num(&u, "1"), deg), "0");
    check(u.acos(&Decimal::ZERO, AngleMode::Gradians), "100");
    check(u.acos(&num(&u, "-1"), AngleMode::Radians), "3.14159265359");
    check_signal(
        u.asin(&num(&u, "1.5"), deg),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
    check_signal(
        u.acos(&num(&u, "-2"), deg),
        Decimal::NAN,
        Signal::InvalidOperation,
    );
}

#[test]
fn test_angle_conversion() {
    let u = hp();
    check(u.to_radians(&num(&u, "180"), AngleMode::Degrees), "3.14159265359");
    check(u.to_radians(&num(&u, "100"), AngleMode::Gradians), "1.57079632679");
    check(u.from_radians(&num(&u, "3.14159265359"), AngleMode::Degrees), "180");
    check(u.to_radians(&num(&u, "2"), AngleMode::Radians), "2");
}

#[test]
fn test_hyperbolic() {
    let u = hp();
    check(u.sinh(&num(&u, "1")), "1.17520119364");
    check(u.sinh(&num(&u, "-1e-20")), "-1e-20");
    check(u.cosh(&num(&u, "1")), "1.54308063482");
    check(u.tanh(&num(&u, "0.5")), "0.46211715726");
    check(u.tanh(&num(&u, "-5000")), "-1");
    check(u.asinh(&num(&u, "1")), "0.88137358702");
    check(u.asinh(&num(&u, "-1e-20")), "-1e-20");
    check(u.acosh(&num(&u, "2")), "1.31695789692");
    check(u.acosh(&num(&u, "1")), "0");
    check(u.atanh(&num(&u, "0.5")), "0.549306144334");
    check(u.atanh(&num(&u, "-0.5")), "-0.549306144334");
}

#[test]
fn test_hyperbolic_special_cases() {
    let u = hp();
    check_signal(
        u.atanh(&num(&u, "1")),
        Decimal::INFINITY,
        Signal::DivideByZero,
    );
    check_signal(
        u.atanh(&num(&u, "-1")),
        Decimal::NEGATIVE_INFINITY,
        Signal::DivideByZero,
    );
    check_signal(u.atanh(&num(&u, "2")), Decimal::NAN, Signal::InvalidOperation);
    check_signal(u.acosh(&num(&u, "0.5")), Decimal::NAN, Signal::InvalidOperation);
    check_signal(u.sinh(&num(&u, "-2000")), Decimal::NEGATIVE_INFINITY, Signal::Overflow);
    check_signal(u.cosh(&num(&u, "1e10")), Decimal::INFINITY, Signal::Overflow);
}

#[test]
fn test_nan_propagates() {
    let u = hp();
    let deg = AngleMode::Degrees;
    for out in [
        u.exp(&Decimal::NAN),
        u.ln(&Decimal::NAN),
        u.sin(&Decimal::NAN, deg),
        u.atan(&Decimal::NAN, deg),
        u.pow(&Decimal::NAN, &Decimal::ZERO),
        u.atanh(&Decimal::NAN),
    ] {
        assert!(out.value.is_nan());
        assert_eq!(out.signal, Signal::None);
    }
    assert!(u.sqrt(&Decimal::ERROR).value.is_error());
}

#[test]
fn test_series_cap_raises_out_of_range() {
    let w = Working::new(&hp());
    // Terms which never shrink.
    let sum = w.series(Decimal::ONE, |term, _| *term);
    assert!(sum.is_normal());
    let out = w.finish(&hp(), sum);
    assert_eq!(out.signal, Signal::OutOfRange);
}

mod proptests {
    use base::prelude::*;
    use test_strategy::{proptest, Arbitrary};

    use super::super::super::unit::ArithmeticUnit;

    #[derive(Debug, Arbitrary)]
    struct Positive {
        #[strategy(-20..=20i32)]
        exponent: i32,
        #[strategy(1..=9u8)]
        lead: u8,
        #[strategy(proptest::collection::vec(0..=9u8, 0..11))]
        rest: Vec<u8>,
    }

    impl Positive {
        fn value(&self) -> Decimal {
            let mut digits = vec![self.lead];
            digits.extend_from_slice(&self.rest);
            Decimal::new(false, self.exponent, &digits, &PrecisionMode::HP42S)
                .expect("strategy generates valid decimals")
        }
    }

    /// The difference between `a` and `b` in units of the last place
    /// of `b`, which must be normal.
    fn ulps(unit: &ArithmeticUnit, a: &Decimal, b: &Decimal) -> Decimal {
        let diff = unit.subtract(a, b).value.abs();
        let ulp = Decimal::power_of_ten(b.exponent() - 11);
        unit.divide(&diff, &ulp).value
    }

    #[proptest]
    fn exp_undoes_ln(x: Positive) {
        let unit = ArithmeticUnit::new(PrecisionMode::HP42S);
        let x = x.value();
        let back = unit.exp(&unit.ln(&x).value);
        assert_eq!(back.signal, Signal::None);
        // Rounding ln x costs about |ln x| / 2 units of x.
        let tolerance = unit.from_i64(12 * (i64::from(x.exponent().abs()) + 1) + 2).value;
        assert!(ulps(&unit, &back.value, &x) <= tolerance, "{x} came back as {}", back.value);
    }

    #[proptest]
    fn sqrt_squares_back(x: Positive) {
        let unit = ArithmeticUnit::new(PrecisionMode::HP42S);
        let x = x.value();
        let root = unit.sqrt(&x).value;
        let square = unit.square(&root).value;
        let four = unit.from_i64(4).value;
        assert!(ulps(&unit, &square, &x) <= four, "sqrt {x} = {root}");
    }

    #[proptest]
    fn sine_is_odd(x: Positive) {
        let unit = ArithmeticUnit::new(PrecisionMode::HP42S);
        let x = x.value();
        for angle in [super::AngleMode::Degrees, super::AngleMode::Radians] {
            let s = unit.sin(&x, angle).value;
            let t = unit.sin(&x.negated(), angle).value;
            assert!(s.is_identical(&t.negated()) || (s.is_zero() && t.is_zero()));
        }
    }
}
