//! Entities Layer: Big Numbers
//!
//! Provides the arbitrary precision integer types used to derive fixture values:
//! - [`BigNumber`]: malachite-backed integer, the trusted reference arithmetic
//! - [`DigitNumber`]: sign plus little-endian base-256 digits, with explicit
//!   carry/borrow, schoolbook multiplication and digit shifting
//!
//! Both implement [`BigArithmetic`], so any consumer of fixture arithmetic can be
//! driven by either representation and the results compared bit-for-bit.

pub mod arithmetic;
pub mod big;
pub mod digits;

pub use arithmetic::BigArithmetic;
pub use big::{BigNumber, ParseBigNumberError};
pub use digits::DigitNumber;
