//! Fixture Layout Module
//!
//! Section order and entry counts of a fixture stream, derived from the two
//! header counts alone.

use std::fmt;

use infrastructure_bignum_encoding::FIXED32_SIZE;

/// Sections of a fixture stream, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    PrimaryCount,
    ShiftCount,
    PrimaryCatalog,
    ShiftCatalog,
    ArithmeticMatrix,
    ShiftMatrix,
    ComparisonMatrix,
}

impl Section {
    /// Every section, in the order it appears in the stream
    pub const ORDER: [Section; 7] = [
        Section::PrimaryCount,
        Section::ShiftCount,
        Section::PrimaryCatalog,
        Section::ShiftCatalog,
        Section::ArithmeticMatrix,
        Section::ShiftMatrix,
        Section::ComparisonMatrix,
    ];

    /// Short lowercase name used in logs and errors
    pub fn name(self) -> &'static str {
        match self {
            Section::PrimaryCount => "primary count",
            Section::ShiftCount => "shift count",
            Section::PrimaryCatalog => "primary catalog",
            Section::ShiftCatalog => "shift catalog",
            Section::ArithmeticMatrix => "arithmetic matrix",
            Section::ShiftMatrix => "shift matrix",
            Section::ComparisonMatrix => "comparison matrix",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry counts for a stream over `primary` operands and `shift` amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureLayout {
    pub primary: u64,
    pub shift: u64,
}

/// Results emitted per ordered primary pair: sum, product, difference
pub const RESULTS_PER_PAIR: u64 = 3;

impl FixtureLayout {
    /// Layout for the given catalog cardinalities
    pub fn for_counts(primary: usize, shift: usize) -> Self {
        Self {
            primary: primary as u64,
            shift: shift as u64,
        }
    }

    /// Section order of the stream
    pub fn section_order(&self) -> &'static [Section] {
        &Section::ORDER
    }

    /// Number of entries `section` holds
    pub fn entries(&self, section: Section) -> u64 {
        match section {
            Section::PrimaryCount | Section::ShiftCount => 1,
            Section::PrimaryCatalog => self.primary,
            Section::ShiftCatalog => self.shift,
            Section::ArithmeticMatrix => RESULTS_PER_PAIR.saturating_mul(self.pairs()),
            Section::ShiftMatrix => self.primary.saturating_mul(self.shift),
            Section::ComparisonMatrix => self.pairs(),
        }
    }

    /// Byte size of `section` when its entries are fixed width
    ///
    /// Integer-encoded sections depend on the values and return `None`.
    pub fn fixed_size(&self, section: Section) -> Option<u64> {
        match section {
            Section::PrimaryCount | Section::ShiftCount => Some(FIXED32_SIZE as u64),
            Section::ShiftCatalog => Some(self.shift.saturating_mul(FIXED32_SIZE as u64)),
            Section::ComparisonMatrix => Some(self.pairs()),
            Section::PrimaryCatalog | Section::ArithmeticMatrix | Section::ShiftMatrix => None,
        }
    }

    /// Ordered primary pairs (a, b)
    pub fn pairs(&self) -> u64 {
        self.primary.saturating_mul(self.primary)
    }

    /// Position of result `k` (0 sum, 1 product, 2 difference) for pair (i, j)
    /// within the arithmetic matrix
    pub fn arithmetic_index(&self, i: u64, j: u64, k: u64) -> u64 {
        RESULTS_PER_PAIR * (i * self.primary + j) + k
    }

    /// Position of `primary[i] >> shift[j]` within the shift matrix
    pub fn shift_index(&self, i: u64, j: u64) -> u64 {
        i * self.shift + j
    }

    /// Position of the symbol for pair (i, j) within the comparison matrix
    pub fn comparison_index(&self, i: u64, j: u64) -> u64 {
        i * self.primary + j
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_for_small_layout() {
        let layout = FixtureLayout::for_counts(4, 2);
        assert_eq!(layout.entries(Section::PrimaryCatalog), 4);
        assert_eq!(layout.entries(Section::ShiftCatalog), 2);
        assert_eq!(layout.entries(Section::ArithmeticMatrix), 48);
        assert_eq!(layout.entries(Section::ShiftMatrix), 8);
        assert_eq!(layout.entries(Section::ComparisonMatrix), 16);
    }

    #[test]
    fn test_fixed_sizes() {
        let layout = FixtureLayout::for_counts(4, 2);
        assert_eq!(layout.fixed_size(Section::PrimaryCount), Some(4));
        assert_eq!(layout.fixed_size(Section::ShiftCatalog), Some(8));
        assert_eq!(layout.fixed_size(Section::ComparisonMatrix), Some(16));
        assert_eq!(layout.fixed_size(Section::ArithmeticMatrix), None);
    }

    #[test]
    fn test_row_major_indices() {
        let layout = FixtureLayout::for_counts(4, 3);
        assert_eq!(layout.arithmetic_index(0, 0, 0), 0);
        assert_eq!(layout.arithmetic_index(0, 1, 2), 5);
        assert_eq!(layout.arithmetic_index(1, 0, 0), 12);
        assert_eq!(layout.shift_index(2, 1), 7);
        assert_eq!(layout.comparison_index(3, 3), 15);
    }

    #[test]
    fn test_section_order_starts_with_header() {
        let layout = FixtureLayout::for_counts(0, 0);
        let order = layout.section_order();
        assert_eq!(order.first(), Some(&Section::PrimaryCount));
        assert_eq!(order.last(), Some(&Section::ComparisonMatrix));
        assert_eq!(Section::ShiftMatrix.to_string(), "shift matrix");
    }

    #[test]
    fn test_empty_catalog_layout() {
        let layout = FixtureLayout::for_counts(0, 5);
        assert_eq!(layout.entries(Section::ArithmeticMatrix), 0);
        assert_eq!(layout.entries(Section::ShiftMatrix), 0);
        assert_eq!(layout.fixed_size(Section::ShiftCatalog), Some(20));
    }
}
