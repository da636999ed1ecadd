//! Arithmetic Abstraction Module
//!
//! The operations a fixture generator needs from an integer representation.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Signed arbitrary precision arithmetic over a sign/magnitude view.
///
/// `magnitude_le_bytes` and `from_magnitude` form the bridge between
/// implementations: the magnitude is little-endian, minimal (no high zero
/// bytes) and empty for zero. Zero is never negative.
pub trait BigArithmetic: Clone + Debug + PartialEq {
    /// The value zero
    fn zero() -> Self;

    /// Build a value from a little-endian magnitude and a sign flag
    ///
    /// High zero bytes are accepted and ignored. A negative flag on a zero
    /// magnitude yields (positive) zero.
    fn from_magnitude(bytes: &[u8], negative: bool) -> Self;

    /// Minimal little-endian magnitude bytes (empty for zero)
    fn magnitude_le_bytes(&self) -> Vec<u8>;

    /// True if the value is strictly below zero
    fn is_negative(&self) -> bool;

    /// x + y
    fn plus(&self, other: &Self) -> Self;

    /// x - y
    fn minus(&self, other: &Self) -> Self;

    /// x * y
    fn times(&self, other: &Self) -> Self;

    /// Arithmetic right shift: floor(x / 2^bits)
    fn shr(&self, bits: u32) -> Self;

    /// Signed comparison
    fn comp(&self, other: &Self) -> Ordering;

    /// Re-express this value in another representation
    fn convert<T: BigArithmetic>(&self) -> T {
        T::from_magnitude(&self.magnitude_le_bytes(), self.is_negative())
    }
}
