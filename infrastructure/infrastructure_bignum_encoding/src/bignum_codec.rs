//! Bignum Codec Module
//!
//! Encodes and decodes signed arbitrary precision integers, fixed-width
//! unsigned fields, and comparison symbols.
//!
//! ## Integer layout
//!
//! ```text
//! +----------------+------+---------------------------+
//! | length: u32 LE | sign | magnitude (length bytes)  |
//! +----------------+------+---------------------------+
//! ```
//!
//! The magnitude is little-endian and minimal. For example `127` encodes as
//! `01 00 00 00 2b 7f`, `-1` as `01 00 00 00 2d 01`, and `0` as
//! `00 00 00 00 2b`.

use std::cmp::Ordering;

use entities_bignum::BigArithmetic;

use crate::common::{
    length_prefix, read_u32_le, write_u32_le, DecodeError, EncodeError, FIXED32_SIZE, LENGTH_PREFIX_SIZE,
    SIGN_NEGATIVE, SIGN_POSITIVE, SYMBOL_EQUAL, SYMBOL_GREATER, SYMBOL_LESS,
};

/// Bignum codec
pub struct BignumCodec;

impl BignumCodec {
    /// Encode a signed integer
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entities_bignum::BigNumber;
    /// use infrastructure_bignum_encoding::BignumCodec;
    ///
    /// let encoded = BignumCodec::encode(&BigNumber::from_i64(-1)).unwrap();
    /// assert_eq!(encoded, vec![1, 0, 0, 0, b'-', 1]);
    /// ```
    pub fn encode<N: BigArithmetic>(value: &N) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        Self::encode_into(&mut buf, value)?;
        Ok(buf)
    }

    /// Append the encoding of `value` to `buf`
    ///
    /// Fails with [`EncodeError::MagnitudeTooLong`] when the magnitude does
    /// not fit the `u32` length prefix; `buf` is left untouched in that case.
    ///
    /// # Returns
    ///
    /// Number of bytes written
    pub fn encode_into<N: BigArithmetic>(buf: &mut Vec<u8>, value: &N) -> Result<usize, EncodeError> {
        let magnitude = value.magnitude_le_bytes();
        let length = length_prefix(magnitude.len())?;

        let start = buf.len();
        buf.reserve(LENGTH_PREFIX_SIZE + 1 + magnitude.len());
        write_u32_le(buf, length);
        buf.push(if value.is_negative() {
            SIGN_NEGATIVE
        } else {
            SIGN_POSITIVE
        });
        buf.extend_from_slice(&magnitude);
        Ok(buf.len() - start)
    }

    /// Size of the encoding of `value` without producing it
    pub fn encoded_len<N: BigArithmetic>(value: &N) -> usize {
        LENGTH_PREFIX_SIZE + 1 + value.magnitude_le_bytes().len()
    }

    /// Decode a signed integer from the start of `data`
    ///
    /// Only canonical encodings are accepted: no high zero magnitude byte and
    /// no negative zero.
    ///
    /// # Returns
    ///
    /// * `Ok((value, bytes_consumed))`
    /// * `Err(DecodeError)` on truncation or a malformed field
    pub fn decode<N: BigArithmetic>(data: &[u8]) -> Result<(N, usize), DecodeError> {
        let length = read_u32_le(data)? as usize;
        let mut index = LENGTH_PREFIX_SIZE;

        let sign = *data.get(index).ok_or(DecodeError::BufferTooShort {
            needed: index + 1,
            available: data.len(),
        })?;
        let is_negative = match sign {
            SIGN_POSITIVE => false,
            SIGN_NEGATIVE => true,
            other => return Err(DecodeError::InvalidSign(other)),
        };
        index += 1;

        let end = index.checked_add(length).ok_or(DecodeError::BufferTooShort {
            needed: usize::MAX,
            available: data.len(),
        })?;
        let magnitude = data.get(index..end).ok_or(DecodeError::BufferTooShort {
            needed: end,
            available: data.len(),
        })?;

        match magnitude.last() {
            Some(0) => return Err(DecodeError::NonCanonical("high zero magnitude byte")),
            None if is_negative => return Err(DecodeError::NonCanonical("negative zero")),
            _ => {}
        }

        Ok((N::from_magnitude(magnitude, is_negative), end))
    }

    /// Encode a non-negative value as exactly four little-endian bytes
    ///
    /// Fails instead of truncating when the value does not fit.
    pub fn encode_fixed32<N: BigArithmetic>(value: &N) -> Result<[u8; FIXED32_SIZE], EncodeError> {
        if value.is_negative() {
            return Err(EncodeError::NegativeValue);
        }
        let magnitude = value.magnitude_le_bytes();
        if magnitude.len() > FIXED32_SIZE {
            return Err(EncodeError::ValueTooLarge {
                bytes: magnitude.len(),
            });
        }
        let mut field = [0u8; FIXED32_SIZE];
        field[..magnitude.len()].copy_from_slice(&magnitude);
        Ok(field)
    }

    /// Decode a fixed four-byte little-endian field
    ///
    /// # Returns
    ///
    /// * `Ok((value, bytes_consumed))`
    pub fn decode_fixed32(data: &[u8]) -> Result<(u32, usize), DecodeError> {
        Ok((read_u32_le(data)?, FIXED32_SIZE))
    }

    /// Comparison symbol for `a` against `b`: `>`, `<` or `=`
    pub fn compare_symbol<N: BigArithmetic>(a: &N, b: &N) -> u8 {
        Self::symbol_for(a.comp(b))
    }

    /// Comparison symbol for an ordering
    pub fn symbol_for(ordering: Ordering) -> u8 {
        match ordering {
            Ordering::Greater => SYMBOL_GREATER,
            Ordering::Less => SYMBOL_LESS,
            Ordering::Equal => SYMBOL_EQUAL,
        }
    }

    /// Ordering named by a comparison symbol byte
    pub fn decode_symbol(byte: u8) -> Result<Ordering, DecodeError> {
        match byte {
            SYMBOL_GREATER => Ok(Ordering::Greater),
            SYMBOL_LESS => Ok(Ordering::Less),
            SYMBOL_EQUAL => Ok(Ordering::Equal),
            other => Err(DecodeError::InvalidSymbol(other)),
        }
    }
}
