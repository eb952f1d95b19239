//! Helpers for working on unsigned digit strings.  All slices hold
//! one decimal digit per element, most significant first, and the
//! two operands of a binary helper always have the same length.
use std::cmp::Ordering;

/// Adds `b` into `a`, returning the carry out of the top digit.
pub(crate) fn add_in_place(a: &mut [u8], b: &[u8]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    let mut carry = 0;
    for (x, y) in a.iter_mut().zip(b.iter()).rev() {
        let sum = *x + *y + carry;
        *x = sum % 10;
        carry = sum / 10;
    }
    carry != 0
}

/// Subtracts `b` from `a`.  `a` must not be less than `b`.
pub(crate) fn sub_in_place(a: &mut [u8], b: &[u8]) {
    debug_assert_eq!(a.len(), b.len());
    let mut borrow = 0;
    for (x, y) in a.iter_mut().zip(b.iter()).rev() {
        let subtrahend = *y + borrow;
        if *x >= subtrahend {
            *x -= subtrahend;
            borrow = 0;
        } else {
            *x = *x + 10 - subtrahend;
            borrow = 1;
        }
    }
    debug_assert_eq!(borrow, 0, "sub_in_place: minuend was smaller than subtrahend");
}

/// Compares two equal-length digit strings as unsigned integers.
pub(crate) fn compare(a: &[u8], b: &[u8]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    a.cmp(b)
}

/// Multiplies by ten, discarding the top digit (which the caller
/// must have arranged to be zero) and shifting `incoming` in at the
/// bottom.
pub(crate) fn shift_left(a: &mut [u8], incoming: u8) {
    debug_assert_eq!(a.first().copied().unwrap_or(0), 0);
    a.rotate_left(1);
    if let Some(last) = a.last_mut() {
        *last = incoming;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_carry() {
        let mut a = [0, 9, 9, 5];
        assert!(!add_in_place(&mut a, &[0, 0, 0, 7]));
        assert_eq!(a, [1, 0, 0, 2]);
        let mut a = [9, 9];
        assert!(add_in_place(&mut a, &[0, 1]));
        assert_eq!(a, [0, 0]);
    }

    #[test]
    fn test_sub_with_borrow() {
        let mut a = [1, 0, 0, 0];
        sub_in_place(&mut a, &[0, 0, 0, 1]);
        assert_eq!(a, [0, 9, 9, 9]);
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&[0, 1, 2], &[0, 1, 3]), Ordering::Less);
        assert_eq!(compare(&[1, 0, 0], &[0, 9, 9]), Ordering::Greater);
        assert_eq!(compare(&[4, 2], &[4, 2]), Ordering::Equal);
    }

    #[test]
    fn test_shift_left() {
        let mut a = [0, 1, 2];
        shift_left(&mut a, 7);
        assert_eq!(a, [1, 2, 7]);
    }
}
