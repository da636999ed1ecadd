//! Use Cases Layer: Fixture Generation
//!
//! Derives the complete operation matrix over an operand catalog and writes it
//! as one deterministic binary stream:
//!
//! 1. Header: primary count, shift count (fixed32 each)
//! 2. Primary catalog (integer encodings)
//! 3. Shift catalog (fixed32 each)
//! 4. Arithmetic matrix: sum, product, difference per ordered pair, row-major
//! 5. Shift matrix: primary value arithmetically shifted right, row-major
//! 6. Comparison matrix: one symbol byte per ordered pair, row-major
//!
//! The stream carries no section markers; [`FixtureReplay`] walks it in the same
//! enumeration order to recover every value positionally.

pub mod emitter;
pub mod layout;
pub mod replay;

pub use emitter::{Backend, FixtureEmitter, FixtureError, UnknownBackend};
pub use layout::{FixtureLayout, Section};
pub use replay::{FixtureReplay, ParsedFixture, ReplayError};
