//! Big Number Operations
//!
//! Provides arbitrary precision integer operations backed by the `malachite`
//! crate. This is the trusted arithmetic a fixture corpus is derived from: the
//! values it produces are what an external bignum library must reproduce
//! bit-for-bit.

use std::cmp::Ordering;
use std::fmt;

use malachite::Integer;
use thiserror::Error;

use crate::arithmetic::BigArithmetic;

/// Errors from parsing textual big number literals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBigNumberError {
    /// No digits after the optional sign and prefix
    #[error("empty hex literal")]
    Empty,
    /// A character outside `[0-9a-fA-F]`
    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },
}

/// Big number representation using malachite's Integer
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigNumber {
    value: Integer,
}

impl BigNumber {
    /// Create a new big number from i64
    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from u64
    pub fn from_u64(value: u64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from u32
    pub fn from_u32(value: u32) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// 2^exponent
    pub fn pow2(exponent: u64) -> Self {
        Self {
            value: Integer::from(1u32) << exponent,
        }
    }

    /// 2^exponent - 1, the all-ones value of `exponent` bits
    pub fn pow2_minus_one(exponent: u64) -> Self {
        Self {
            value: (Integer::from(1u32) << exponent) - Integer::from(1u32),
        }
    }

    /// Parse a big-endian hexadecimal literal
    ///
    /// Accepts an optional leading `-` and an optional `0x`/`0X` prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_bignum::BigNumber;
    ///
    /// let n = BigNumber::from_hex("0xff").unwrap();
    /// assert_eq!(n, BigNumber::from_u32(255));
    /// ```
    pub fn from_hex(literal: &str) -> Result<Self, ParseBigNumberError> {
        let (negative, unsigned) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let digits = unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned);
        if digits.is_empty() {
            return Err(ParseBigNumberError::Empty);
        }

        let offset = literal.len() - digits.len();
        let mut value = Integer::from(0u32);
        for (i, c) in digits.chars().enumerate() {
            let digit = c.to_digit(16).ok_or(ParseBigNumberError::InvalidDigit {
                digit: c,
                position: offset + i,
            })?;
            value = (value << 4u64) + Integer::from(digit);
        }

        Ok(Self {
            value: if negative { -value } else { value },
        })
    }

    /// Build from little-endian magnitude bytes and a sign flag
    pub fn from_le_bytes(bytes: &[u8], is_negative: bool) -> Self {
        let mut value = Integer::from(0u32);
        for &byte in bytes.iter().rev() {
            value = (value << 8u64) + Integer::from(byte);
        }
        Self {
            value: if is_negative { -value } else { value },
        }
    }

    /// Minimal little-endian magnitude bytes and sign flag
    ///
    /// Zero yields an empty byte vector and `false`.
    pub fn to_le_bytes(&self) -> (Vec<u8>, bool) {
        let is_negative = self.is_negative();
        let mut v = if is_negative {
            -self.value.clone()
        } else {
            self.value.clone()
        };
        let base = Integer::from(256u32);

        let mut bytes = Vec::new();
        while v > 0 {
            let remainder = &v % &base;
            // Remainder is always < 256
            bytes.push(u64::try_from(&remainder).map_or(0, |r| r as u8));
            v = &v / &base;
        }

        (bytes, is_negative)
    }

    /// Convert to u32
    ///
    /// Returns None if the value is negative or too large
    pub fn to_u32(&self) -> Option<u32> {
        u32::try_from(&self.value).ok()
    }

    /// Convert to i64
    ///
    /// Returns None if the value is out of range
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(&self.value).ok()
    }

    /// Check if the number is below zero
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    /// Check if the number is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Number of significant bits in the magnitude (0 for zero)
    pub fn bit_length(&self) -> u64 {
        let (bytes, _) = self.to_le_bytes();
        match bytes.last() {
            Some(&top) => (bytes.len() as u64 - 1) * 8 + u64::from(8 - top.leading_zeros()),
            None => 0,
        }
    }

    /// Add two big numbers: x + y
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            value: &self.value + &other.value,
        }
    }

    /// Subtract two big numbers: x - y
    pub fn minus(&self, other: &Self) -> Self {
        Self {
            value: &self.value - &other.value,
        }
    }

    /// Multiply two big numbers: x * y
    pub fn times(&self, other: &Self) -> Self {
        Self {
            value: &self.value * &other.value,
        }
    }

    /// Arithmetic right shift: x >> bits
    ///
    /// Rounds toward negative infinity, so `-1 >> n == -1` for every `n`.
    pub fn shr(&self, bits: u32) -> Self {
        Self {
            value: &self.value >> u64::from(bits),
        }
    }

    /// Compare two big numbers (signed comparison)
    pub fn comp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl BigArithmetic for BigNumber {
    fn zero() -> Self {
        Self::from_u32(0)
    }

    fn from_magnitude(bytes: &[u8], negative: bool) -> Self {
        Self::from_le_bytes(bytes, negative)
    }

    fn magnitude_le_bytes(&self) -> Vec<u8> {
        self.to_le_bytes().0
    }

    fn is_negative(&self) -> bool {
        BigNumber::is_negative(self)
    }

    fn plus(&self, other: &Self) -> Self {
        BigNumber::plus(self, other)
    }

    fn minus(&self, other: &Self) -> Self {
        BigNumber::minus(self, other)
    }

    fn times(&self, other: &Self) -> Self {
        BigNumber::times(self, other)
    }

    fn shr(&self, bits: u32) -> Self {
        BigNumber::shr(self, bits)
    }

    fn comp(&self, other: &Self) -> Ordering {
        BigNumber::comp(self, other)
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<i64> for BigNumber {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<u32> for BigNumber {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}
