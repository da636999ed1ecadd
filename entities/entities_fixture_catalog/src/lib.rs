//! Entities Layer: Fixture Catalog
//!
//! Provides the ordered operand catalogs a fixture stream is derived from:
//! - Primary operands (arbitrary precision signed integers)
//! - Shift amounts (non-negative, each representable in 32 bits)
//!
//! Catalog order is part of the fixture format. Consumers locate every derived
//! value by replaying the same enumeration, so entries are never sorted or
//! deduplicated.

pub mod catalog;

pub use catalog::{CatalogBuilder, CatalogError, OperandCatalog};
