//! Common Encoding/Decoding Utilities
//!
//! Wire constants, error types, and the little-endian `u32` field helpers
//! shared by the integer and fixed-width codecs.

use thiserror::Error;

/// Size of the magnitude length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of a fixed-width unsigned field
pub const FIXED32_SIZE: usize = 4;

/// Sign marker for zero and positive values
pub const SIGN_POSITIVE: u8 = b'+';

/// Sign marker for negative values
pub const SIGN_NEGATIVE: u8 = b'-';

/// Comparison symbol: left operand greater
pub const SYMBOL_GREATER: u8 = b'>';

/// Comparison symbol: left operand smaller
pub const SYMBOL_LESS: u8 = b'<';

/// Comparison symbol: operands equal
pub const SYMBOL_EQUAL: u8 = b'=';

/// Encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Negative value submitted to an unsigned fixed-width field
    #[error("negative value cannot be stored in an unsigned 32-bit field")]
    NegativeValue,
    /// Magnitude wider than the fixed-width field
    #[error("value needs {bytes} magnitude bytes, more than a 32-bit field holds")]
    ValueTooLarge { bytes: usize },
    /// Magnitude longer than the integer length prefix can describe
    #[error("magnitude of {bytes} bytes overflows the 32-bit length prefix")]
    MagnitudeTooLong { bytes: usize },
}

/// Decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the field requires
    #[error("buffer too short: need {needed} bytes, {available} available")]
    BufferTooShort { needed: usize, available: usize },
    /// Sign marker other than `+` or `-`
    #[error("invalid sign marker 0x{0:02x}")]
    InvalidSign(u8),
    /// Magnitude with a high zero byte, or a zero tagged negative
    #[error("non-canonical integer encoding: {0}")]
    NonCanonical(&'static str),
    /// Comparison byte other than `<`, `=` or `>`
    #[error("invalid comparison symbol 0x{0:02x}")]
    InvalidSymbol(u8),
}

/// Append `value` as four little-endian bytes
pub(crate) fn write_u32_le(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Length prefix for a magnitude of `len` bytes
pub(crate) fn length_prefix(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::MagnitudeTooLong { bytes: len })
}

/// Read four little-endian bytes from the start of `data`
pub(crate) fn read_u32_le(data: &[u8]) -> Result<u32, DecodeError> {
    let field = data.get(..FIXED32_SIZE).ok_or(DecodeError::BufferTooShort {
        needed: FIXED32_SIZE,
        available: data.len(),
    })?;
    Ok(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_field_is_little_endian() {
        let mut buf = Vec::new();
        write_u32_le(&mut buf, 0x0403_0201);
        assert_eq!(buf, vec![1, 2, 3, 4]);
        assert_eq!(read_u32_le(&buf), Ok(0x0403_0201));
    }

    #[test]
    fn test_length_prefix_bounds() {
        assert_eq!(length_prefix(0), Ok(0));
        assert_eq!(length_prefix(u32::MAX as usize), Ok(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_length_prefix_overflow() {
        let len = u32::MAX as usize + 1;
        assert_eq!(length_prefix(len), Err(EncodeError::MagnitudeTooLong { bytes: len }));
    }

    #[test]
    fn test_read_u32_short_buffer() {
        assert_eq!(
            read_u32_le(&[1, 2, 3]),
            Err(DecodeError::BufferTooShort { needed: 4, available: 3 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DecodeError::InvalidSign(b'x').to_string(),
            "invalid sign marker 0x78"
        );
        assert_eq!(
            EncodeError::ValueTooLarge { bytes: 5 }.to_string(),
            "value needs 5 magnitude bytes, more than a 32-bit field holds"
        );
    }
}
