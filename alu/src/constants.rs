//! Mathematical constants, held to more digits than any mode can
//! store and rounded to the precision which is needed.
use base::prelude::*;

const PI: &str = "31415926535897932384626433832795028841971693993751\
                  05820974944592307816406286208998628034825342117068";

const LN_2: &str = "69314718055994530941723212145817656807550013436025\
                    52541206800094933936219696947156058633269964186875";

const LN_10: &str = "23025850929940456840179914546843642076011014886287\
                     72976033327900967572609677352480235997205089598298";

fn constant(digits: &str, exponent: i64, mode: &PrecisionMode) -> Decimal {
    let mut buf = [0_u8; 100];
    let mut len = 0;
    for (slot, d) in buf.iter_mut().zip(digits.bytes()) {
        *slot = d - b'0';
        len += 1;
    }
    // These constants lie well inside every exponent range, so the
    // rounding raises no signal.
    Decimal::round_digits(false, exponent, &buf[..len], mode).value
}

pub(crate) fn pi(mode: &PrecisionMode) -> Decimal {
    constant(PI, 0, mode)
}

pub(crate) fn ln_2(mode: &PrecisionMode) -> Decimal {
    constant(LN_2, -1, mode)
}

pub(crate) fn ln_10(mode: &PrecisionMode) -> Decimal {
    constant(LN_10, 0, mode)
}
