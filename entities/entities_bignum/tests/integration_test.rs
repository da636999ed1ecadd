//! Integration tests for entities_bignum crate
//!
//! The digit arithmetic is checked against the malachite-backed reference on
//! random operands, including magnitudes well past 128 bits.

use std::cmp::Ordering;

use entities_bignum::*;
use proptest::prelude::*;

fn operand() -> impl Strategy<Value = (Vec<u8>, bool)> {
    (prop::collection::vec(any::<u8>(), 0..40), any::<bool>())
}

fn pair(bytes: &[u8], negative: bool) -> (BigNumber, DigitNumber) {
    (
        BigNumber::from_magnitude(bytes, negative),
        DigitNumber::from_magnitude(bytes, negative),
    )
}

proptest! {
    #[test]
    fn prop_digit_arithmetic_matches_reference((a_bytes, a_neg) in operand(), (b_bytes, b_neg) in operand()) {
        let (a_ref, a_dig) = pair(&a_bytes, a_neg);
        let (b_ref, b_dig) = pair(&b_bytes, b_neg);

        prop_assert_eq!(a_ref.plus(&b_ref).convert::<DigitNumber>(), a_dig.plus(&b_dig));
        prop_assert_eq!(a_ref.minus(&b_ref).convert::<DigitNumber>(), a_dig.minus(&b_dig));
        prop_assert_eq!(a_ref.times(&b_ref).convert::<DigitNumber>(), a_dig.times(&b_dig));
        prop_assert_eq!(a_ref.comp(&b_ref), a_dig.comp(&b_dig));
    }

    #[test]
    fn prop_digit_shift_matches_reference((bytes, negative) in operand(), bits in 0u32..400) {
        let (reference, digits) = pair(&bytes, negative);
        prop_assert_eq!(reference.shr(bits).convert::<DigitNumber>(), digits.shr(bits));
    }

    #[test]
    fn prop_conversion_preserves_value((bytes, negative) in operand()) {
        let (reference, digits) = pair(&bytes, negative);
        prop_assert_eq!(digits.convert::<BigNumber>(), reference.clone());
        prop_assert_eq!(reference.magnitude_le_bytes(), digits.magnitude_le_bytes());
    }
}

#[test]
fn test_zero_difference_is_never_negative() {
    let three = BigNumber::from_i64(3);
    let zero = three.minus(&three);
    assert!(zero.is_zero());
    assert!(!BigArithmetic::is_negative(&zero));
    assert!(zero.magnitude_le_bytes().is_empty());

    let zero = DigitNumber::from_i64(-3).minus(&DigitNumber::from_i64(-3));
    assert_eq!(zero, DigitNumber::zero());
}

#[test]
fn test_large_boundary_products_agree() {
    let a = BigNumber::pow2_minus_one(128);
    let b = BigNumber::from_hex("AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA55AA").unwrap();
    let reference = a.times(&b);
    let digits = a.convert::<DigitNumber>().times(&b.convert::<DigitNumber>());
    assert_eq!(reference.convert::<DigitNumber>(), digits);
    assert!(reference.bit_length() > 400);
}

#[test]
fn test_negative_shift_floor_agrees_across_representations() {
    for value in [-1i64, -2, -3, -255, -256, -257, i64::MIN] {
        for bits in [0u32, 1, 7, 8, 9, 63, 64, 65, i32::MAX as u32] {
            let reference = BigNumber::from_i64(value).shr(bits);
            let digits = DigitNumber::from_i64(value).shr(bits);
            assert_eq!(reference.convert::<DigitNumber>(), digits, "{} >> {}", value, bits);
        }
    }
}

#[test]
fn test_ordering_across_signs() {
    let values = [
        BigNumber::pow2(128),
        BigNumber::from_i64(-1),
        BigNumber::from_i64(0),
        BigNumber::from_i64(1),
    ];
    assert_eq!(values[1].comp(&values[2]), Ordering::Less);
    assert_eq!(values[0].comp(&values[3]), Ordering::Greater);
    assert_eq!(
        values[1].convert::<DigitNumber>().comp(&values[0].convert::<DigitNumber>()),
        Ordering::Less
    );
}
