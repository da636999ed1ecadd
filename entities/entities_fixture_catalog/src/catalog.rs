//! Operand Catalog Module
//!
//! Immutable catalog configuration. A catalog is constructed explicitly (either
//! the canonical [`OperandCatalog::boundary`] set or through a
//! [`CatalogBuilder`]) and handed to the fixture emitter; there is no
//! process-wide catalog state.

use entities_bignum::{BigNumber, ParseBigNumberError};
use thiserror::Error;

/// Bit widths whose `2^k - 1` / `2^k` pairs sit on byte and word boundaries
pub const BOUNDARY_EXPONENTS: [u64; 10] = [7, 8, 15, 16, 31, 32, 63, 64, 127, 128];

/// Boundary exponents whose powers stay usable as shift counts
pub const SHIFT_EXPONENTS: [u64; 4] = [7, 8, 15, 16];

/// Largest shift amount in the canonical catalog (`2^31 - 1`)
pub const MAX_CANONICAL_SHIFT: u32 = i32::MAX as u32;

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Shift amount negative or wider than 32 bits
    #[error("shift amount #{index} ({value}) does not fit an unsigned 32-bit field")]
    ShiftAmountOutOfRange { index: usize, value: String },
    /// More entries than a 32-bit header count can describe
    #[error("{section} catalog has {count} entries, more than a 32-bit count allows")]
    TooManyEntries { section: &'static str, count: usize },
    /// Unparseable operand literal
    #[error("invalid operand literal: {0}")]
    InvalidLiteral(#[from] ParseBigNumberError),
}

/// Ordered primary operands and shift amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandCatalog {
    primary: Vec<BigNumber>,
    shift_amounts: Vec<BigNumber>,
    shift_bits: Vec<u32>,
}

impl OperandCatalog {
    /// The canonical boundary catalog
    ///
    /// Primary operands, in order: 0, 1, 2 through 10, then `2^k - 1, 2^k` for
    /// every k in [`BOUNDARY_EXPONENTS`], then three repeating bit pattern
    /// constants (35 bytes of `F0`, 34 bytes counting `01 23 .. EF`, and 35
    /// alternating `AA 55` bytes).
    ///
    /// Shift amounts: 0, 1, 2 through 10, `2^k - 1, 2^k` for every k in
    /// [`SHIFT_EXPONENTS`], then `2^31 - 1`.
    pub fn boundary() -> Self {
        let mut primary: Vec<BigNumber> = (0..=10).map(BigNumber::from_u32).collect();
        for &k in BOUNDARY_EXPONENTS.iter() {
            primary.push(BigNumber::pow2_minus_one(k));
            primary.push(BigNumber::pow2(k));
        }
        primary.push(repeating_pattern(&[0xF0], 35));
        primary.push(repeating_pattern(
            &[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF],
            34,
        ));
        primary.push(repeating_pattern(&[0xAA, 0x55], 35));

        let mut shift_bits: Vec<u32> = (0..=10).collect();
        for &k in SHIFT_EXPONENTS.iter() {
            shift_bits.push((1u32 << k) - 1);
            shift_bits.push(1u32 << k);
        }
        shift_bits.push(MAX_CANONICAL_SHIFT);

        Self {
            primary,
            shift_amounts: shift_bits.iter().copied().map(BigNumber::from_u32).collect(),
            shift_bits,
        }
    }

    /// Start an empty custom catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Primary operands in catalog order
    pub fn primary(&self) -> &[BigNumber] {
        &self.primary
    }

    /// Shift amounts in catalog order
    pub fn shift_amounts(&self) -> &[BigNumber] {
        &self.shift_amounts
    }

    /// Shift amounts as bit counts, parallel to [`Self::shift_amounts`]
    pub fn shift_bits(&self) -> &[u32] {
        &self.shift_bits
    }
}

/// Builds `bytes` big-endian bytes by cycling `pattern` from the top byte down
fn repeating_pattern(pattern: &[u8], bytes: usize) -> BigNumber {
    let mut le: Vec<u8> = pattern.iter().copied().cycle().take(bytes).collect();
    le.reverse();
    BigNumber::from_le_bytes(&le, false)
}

/// Incremental construction of a custom catalog
///
/// # Examples
///
/// ```rust
/// use entities_fixture_catalog::OperandCatalog;
///
/// let catalog = OperandCatalog::builder()
///     .primary(0u32)
///     .primary(1u32)
///     .primary(-5i64)
///     .shift_amount(3u32)
///     .build()
///     .unwrap();
/// assert_eq!(catalog.primary().len(), 3);
/// assert_eq!(catalog.shift_bits(), &[3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    primary: Vec<BigNumber>,
    shift_amounts: Vec<BigNumber>,
}

impl CatalogBuilder {
    /// Append a primary operand
    pub fn primary(mut self, value: impl Into<BigNumber>) -> Self {
        self.primary.push(value.into());
        self
    }

    /// Append several primary operands in order
    pub fn primary_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = BigNumber>,
    {
        self.primary.extend(values);
        self
    }

    /// Append a primary operand given as a big-endian hex literal
    pub fn primary_hex(self, literal: &str) -> Result<Self, CatalogError> {
        let value = BigNumber::from_hex(literal)?;
        Ok(self.primary(value))
    }

    /// Append a shift amount (validated by [`Self::build`])
    pub fn shift_amount(mut self, value: impl Into<BigNumber>) -> Self {
        self.shift_amounts.push(value.into());
        self
    }

    /// Validate and freeze the catalog
    pub fn build(self) -> Result<OperandCatalog, CatalogError> {
        check_count("primary", self.primary.len())?;
        check_count("shift", self.shift_amounts.len())?;

        let shift_bits = self
            .shift_amounts
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.to_u32().ok_or_else(|| CatalogError::ShiftAmountOutOfRange {
                    index,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<u32>, CatalogError>>()?;

        Ok(OperandCatalog {
            primary: self.primary,
            shift_amounts: self.shift_amounts,
            shift_bits,
        })
    }
}

fn check_count(section: &'static str, count: usize) -> Result<(), CatalogError> {
    if u32::try_from(count).is_err() {
        return Err(CatalogError::TooManyEntries { section, count });
    }
    Ok(())
}
