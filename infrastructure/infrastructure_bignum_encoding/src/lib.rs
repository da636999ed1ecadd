//! Infrastructure Layer: Bignum Encoding
//!
//! Provides the canonical wire encoding for signed arbitrary precision integers
//! used in fixture streams, plus the two auxiliary field encodings.
//!
//! ## Formats
//!
//! - **Integer**: `u32` little-endian magnitude length, one sign byte (`+` or
//!   `-`), then the minimal little-endian magnitude. Zero has an empty
//!   magnitude and is always `+`.
//! - **Fixed32**: exactly four little-endian bytes, no sign, no prefix.
//! - **Comparison symbol**: one ASCII byte, `<`, `=` or `>`.
//!
//! ## Architecture
//!
//! The codec is generic over [`entities_bignum::BigArithmetic`], so values can
//! be encoded from and decoded into either integer representation.

mod common;

pub mod bignum_codec;

pub use bignum_codec::BignumCodec;

// Re-export error types and wire constants for convenience
pub use common::{
    DecodeError, EncodeError, FIXED32_SIZE, LENGTH_PREFIX_SIZE, SIGN_NEGATIVE, SIGN_POSITIVE,
    SYMBOL_EQUAL, SYMBOL_GREATER, SYMBOL_LESS,
};
