//! Base-256 Digit Arithmetic
//!
//! A signed integer held as an explicit little-endian sequence of base-256
//! digits with a separate sign flag. Every operation is a plain digit
//! algorithm: carry/borrow addition and subtraction, schoolbook
//! multiplication, and right shift as a digit drop followed by a bit shift.
//!
//! The representation is kept normalized: no high zero digits, and zero is
//! never negative. The byte layout is therefore exactly the magnitude used by
//! the fixture encoding.

use std::cmp::Ordering;

use crate::arithmetic::BigArithmetic;

/// Signed integer as sign + little-endian base-256 digits
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DigitNumber {
    negative: bool,
    digits: Vec<u8>,
}

impl DigitNumber {
    /// Create from a machine integer
    pub fn from_i64(value: i64) -> Self {
        let magnitude = value.unsigned_abs().to_le_bytes();
        Self::from_parts(value < 0, magnitude.to_vec())
    }

    /// Little-endian digits of the magnitude
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    fn from_parts(negative: bool, digits: Vec<u8>) -> Self {
        let mut n = Self { negative, digits };
        n.normalize();
        n
    }

    fn normalize(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.negative = false;
        }
    }

    fn negated(&self) -> Self {
        Self::from_parts(!self.negative, self.digits.clone())
    }
}

/// Compare two normalized magnitudes
fn cmp_magnitude(a: &[u8], b: &[u8]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// |a| + |b|
fn add_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u16;
    for (i, &digit) in long.iter().enumerate() {
        let sum = u16::from(digit) + u16::from(short.get(i).copied().unwrap_or(0)) + carry;
        result.push(sum as u8);
        carry = sum >> 8;
    }
    if carry != 0 {
        result.push(carry as u8);
    }
    result
}

/// |a| - |b|, requires |a| >= |b|
fn sub_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(a.len());
    let mut borrow = 0i16;
    for (i, &digit) in a.iter().enumerate() {
        let mut diff = i16::from(digit) - i16::from(b.get(i).copied().unwrap_or(0)) - borrow;
        borrow = 0;
        if diff < 0 {
            diff += 256;
            borrow = 1;
        }
        result.push(diff as u8);
    }
    debug_assert_eq!(borrow, 0, "subtrahend larger than minuend");
    result
}

/// |a| * |b| by schoolbook multiplication
fn mul_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut wide = vec![0u8; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0u32;
        for (j, &y) in b.iter().enumerate() {
            // 255 + 255 * 255 + 255 == 0xFFFF, so carry stays below 256
            let t = u32::from(wide[i + j]) + u32::from(x) * u32::from(y) + carry;
            wide[i + j] = t as u8;
            carry = t >> 8;
        }
        wide[i + b.len()] = carry as u8;
    }
    wide
}

/// |a| >> bits, plus whether any 1 bit was shifted out
fn shr_magnitude(a: &[u8], bits: u32) -> (Vec<u8>, bool) {
    let digit_shift = (bits / 8) as usize;
    let bit_shift = bits % 8;
    if digit_shift >= a.len() {
        return (Vec::new(), a.iter().any(|&d| d != 0));
    }

    let mut lost = a[..digit_shift].iter().any(|&d| d != 0);
    if bit_shift > 0 {
        lost |= a[digit_shift] & ((1u8 << bit_shift) - 1) != 0;
    }

    let kept = &a[digit_shift..];
    let mut result = Vec::with_capacity(kept.len());
    for (i, &digit) in kept.iter().enumerate() {
        if bit_shift == 0 {
            result.push(digit);
        } else {
            let high = kept.get(i + 1).copied().unwrap_or(0);
            result.push((digit >> bit_shift) | (high << (8 - bit_shift)));
        }
    }
    (result, lost)
}

impl BigArithmetic for DigitNumber {
    fn zero() -> Self {
        Self::default()
    }

    fn from_magnitude(bytes: &[u8], negative: bool) -> Self {
        Self::from_parts(negative, bytes.to_vec())
    }

    fn magnitude_le_bytes(&self) -> Vec<u8> {
        self.digits.clone()
    }

    fn is_negative(&self) -> bool {
        self.negative
    }

    fn plus(&self, other: &Self) -> Self {
        if self.negative == other.negative {
            return Self::from_parts(self.negative, add_magnitude(&self.digits, &other.digits));
        }
        match cmp_magnitude(&self.digits, &other.digits) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                Self::from_parts(self.negative, sub_magnitude(&self.digits, &other.digits))
            }
            Ordering::Less => {
                Self::from_parts(other.negative, sub_magnitude(&other.digits, &self.digits))
            }
        }
    }

    fn minus(&self, other: &Self) -> Self {
        self.plus(&other.negated())
    }

    fn times(&self, other: &Self) -> Self {
        Self::from_parts(
            self.negative != other.negative,
            mul_magnitude(&self.digits, &other.digits),
        )
    }

    fn shr(&self, bits: u32) -> Self {
        let (shifted, lost) = shr_magnitude(&self.digits, bits);
        if self.negative && lost {
            // floor(-m / 2^k) == -(m >> k) - 1 when any bit was discarded
            Self::from_parts(true, add_magnitude(&shifted, &[1]))
        } else {
            Self::from_parts(self.negative, shifted)
        }
    }

    fn comp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_magnitude(&self.digits, &other.digits),
            (true, true) => cmp_magnitude(&other.digits, &self.digits),
        }
    }
}
