//! Fixture Replay Module
//!
//! Reads a fixture stream back by replaying the emission order, and verifies
//! every derived entry against freshly computed reference values. This is the
//! consumer side of the format: the only structure a reader gets is the two
//! header counts.

use std::cmp::Ordering;

use entities_bignum::BigNumber;
use entities_fixture_catalog::{CatalogError, OperandCatalog};
use infrastructure_bignum_encoding::{BignumCodec, DecodeError};
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::{FixtureLayout, Section};

/// Replay and verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// Stream ended before the comparison matrix was complete
    #[error("fixture truncated in {section}")]
    Truncated { section: Section },
    /// A field in the stream is malformed
    #[error("malformed {section} entry at byte {offset}: {source}")]
    Malformed {
        section: Section,
        offset: usize,
        #[source]
        source: DecodeError,
    },
    /// Bytes follow the comparison matrix
    #[error("{0} trailing bytes after comparison matrix")]
    TrailingBytes(usize),
    /// A derived entry disagrees with the recomputed value
    #[error("{section} entry {index}: expected {expected}, found {actual}")]
    Mismatch {
        section: Section,
        index: u64,
        expected: String,
        actual: String,
    },
}

/// A fully decoded fixture stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFixture {
    primary: Vec<BigNumber>,
    shift_amounts: Vec<u32>,
    /// `[sum, product, difference]` per ordered pair, row-major
    arithmetic: Vec<[BigNumber; 3]>,
    shifts: Vec<BigNumber>,
    comparisons: Vec<Ordering>,
}

/// Positional reader over fixture bytes
pub struct FixtureReplay<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FixtureReplay<'a> {
    /// Decode an entire stream
    pub fn parse(data: &'a [u8]) -> Result<ParsedFixture, ReplayError> {
        let mut replay = Self { data, offset: 0 };

        let primary_count = replay.fixed32(Section::PrimaryCount)? as usize;
        let shift_count = replay.fixed32(Section::ShiftCount)? as usize;
        debug!(primary = primary_count, shift = shift_count, "fixture header");

        // Counts come from untrusted bytes, so vectors grow as entries decode
        let mut primary = Vec::new();
        for _ in 0..primary_count {
            primary.push(replay.integer(Section::PrimaryCatalog)?);
        }

        let mut shift_amounts = Vec::new();
        for _ in 0..shift_count {
            shift_amounts.push(replay.fixed32(Section::ShiftCatalog)?);
        }

        let mut arithmetic = Vec::new();
        for _ in 0..primary_count {
            for _ in 0..primary_count {
                let sum = replay.integer(Section::ArithmeticMatrix)?;
                let product = replay.integer(Section::ArithmeticMatrix)?;
                let difference = replay.integer(Section::ArithmeticMatrix)?;
                arithmetic.push([sum, product, difference]);
            }
        }

        let mut shifts = Vec::new();
        for _ in 0..primary_count {
            for _ in 0..shift_count {
                shifts.push(replay.integer(Section::ShiftMatrix)?);
            }
        }

        let mut comparisons = Vec::new();
        for _ in 0..primary_count {
            for _ in 0..primary_count {
                comparisons.push(replay.symbol()?);
            }
        }

        let trailing = replay.data.len() - replay.offset;
        if trailing != 0 {
            return Err(ReplayError::TrailingBytes(trailing));
        }

        Ok(ParsedFixture {
            primary,
            shift_amounts,
            arithmetic,
            shifts,
            comparisons,
        })
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    fn classify(&self, section: Section, err: DecodeError) -> ReplayError {
        match err {
            DecodeError::BufferTooShort { .. } => ReplayError::Truncated { section },
            source => ReplayError::Malformed {
                section,
                offset: self.offset,
                source,
            },
        }
    }

    fn fixed32(&mut self, section: Section) -> Result<u32, ReplayError> {
        let (value, consumed) =
            BignumCodec::decode_fixed32(self.remaining()).map_err(|e| self.classify(section, e))?;
        self.offset += consumed;
        Ok(value)
    }

    fn integer(&mut self, section: Section) -> Result<BigNumber, ReplayError> {
        let (value, consumed) = BignumCodec::decode::<BigNumber>(self.remaining())
            .map_err(|e| self.classify(section, e))?;
        self.offset += consumed;
        Ok(value)
    }

    fn symbol(&mut self) -> Result<Ordering, ReplayError> {
        let section = Section::ComparisonMatrix;
        let byte = *self
            .remaining()
            .first()
            .ok_or(ReplayError::Truncated { section })?;
        let ordering = BignumCodec::decode_symbol(byte).map_err(|e| self.classify(section, e))?;
        self.offset += 1;
        Ok(ordering)
    }
}

impl ParsedFixture {
    /// Layout implied by the decoded header
    pub fn layout(&self) -> FixtureLayout {
        FixtureLayout::for_counts(self.primary.len(), self.shift_amounts.len())
    }

    /// Primary catalog in stream order
    pub fn primary(&self) -> &[BigNumber] {
        &self.primary
    }

    /// Shift catalog in stream order
    pub fn shift_amounts(&self) -> &[u32] {
        &self.shift_amounts
    }

    /// Stored `[sum, product, difference]` triples, row-major
    pub fn arithmetic(&self) -> &[[BigNumber; 3]] {
        &self.arithmetic
    }

    /// Stored shift results, row-major
    pub fn shifts(&self) -> &[BigNumber] {
        &self.shifts
    }

    /// Stored comparison results, row-major
    pub fn comparisons(&self) -> &[Ordering] {
        &self.comparisons
    }

    /// `primary[i] + primary[j]` as stored
    pub fn sum(&self, i: usize, j: usize) -> Option<&BigNumber> {
        self.triple(i, j).map(|t| &t[0])
    }

    /// `primary[i] * primary[j]` as stored
    pub fn product(&self, i: usize, j: usize) -> Option<&BigNumber> {
        self.triple(i, j).map(|t| &t[1])
    }

    /// `primary[i] - primary[j]` as stored
    pub fn difference(&self, i: usize, j: usize) -> Option<&BigNumber> {
        self.triple(i, j).map(|t| &t[2])
    }

    /// `primary[i] >> shift_amounts[j]` as stored
    pub fn shifted(&self, i: usize, j: usize) -> Option<&BigNumber> {
        let n = self.shift_amounts.len();
        if i >= self.primary.len() || j >= n {
            return None;
        }
        self.shifts.get(i * n + j)
    }

    /// Ordering of `primary[i]` against `primary[j]` as stored
    pub fn comparison(&self, i: usize, j: usize) -> Option<Ordering> {
        self.pair_index(i, j)
            .and_then(|index| self.comparisons.get(index))
            .copied()
    }

    fn pair_index(&self, i: usize, j: usize) -> Option<usize> {
        let n = self.primary.len();
        (i < n && j < n).then(|| i * n + j)
    }

    fn triple(&self, i: usize, j: usize) -> Option<&[BigNumber; 3]> {
        self.pair_index(i, j).and_then(|index| self.arithmetic.get(index))
    }

    /// Rebuild the catalog the stream was generated from
    pub fn to_catalog(&self) -> Result<OperandCatalog, CatalogError> {
        self.shift_amounts
            .iter()
            .fold(
                OperandCatalog::builder().primary_values(self.primary.iter().cloned()),
                |builder, &amount| builder.shift_amount(amount),
            )
            .build()
    }

    /// Recompute every derived entry from the decoded catalog
    ///
    /// Returns the first disagreement in stream order.
    pub fn verify(&self) -> Result<(), ReplayError> {
        let layout = self.layout();

        for (i, a) in self.primary.iter().enumerate() {
            for (j, b) in self.primary.iter().enumerate() {
                let expected = [a.plus(b), a.times(b), a.minus(b)];
                let actual = self.triple(i, j);
                for (k, want) in expected.iter().enumerate() {
                    let got = actual.map(|t| &t[k]);
                    if got != Some(want) {
                        return Err(mismatch(
                            Section::ArithmeticMatrix,
                            layout.arithmetic_index(i as u64, j as u64, k as u64),
                            want,
                            got,
                        ));
                    }
                }
            }
        }

        for (i, a) in self.primary.iter().enumerate() {
            for (j, &bits) in self.shift_amounts.iter().enumerate() {
                let want = a.shr(bits);
                let got = self.shifted(i, j);
                if got != Some(&want) {
                    return Err(mismatch(
                        Section::ShiftMatrix,
                        layout.shift_index(i as u64, j as u64),
                        &want,
                        got,
                    ));
                }
            }
        }

        for (i, a) in self.primary.iter().enumerate() {
            for (j, b) in self.primary.iter().enumerate() {
                let want = a.comp(b);
                let got = self.comparison(i, j);
                if got != Some(want) {
                    return Err(ReplayError::Mismatch {
                        section: Section::ComparisonMatrix,
                        index: layout.comparison_index(i as u64, j as u64),
                        expected: symbol_text(Some(want)),
                        actual: symbol_text(got),
                    });
                }
            }
        }

        info!(
            primary = self.primary.len(),
            shift = self.shift_amounts.len(),
            "fixture verified"
        );
        Ok(())
    }
}

const MISSING: &str = "<missing>";

fn mismatch(
    section: Section,
    index: u64,
    expected: &BigNumber,
    actual: Option<&BigNumber>,
) -> ReplayError {
    ReplayError::Mismatch {
        section,
        index,
        expected: expected.to_string(),
        actual: actual.map_or_else(|| MISSING.to_string(), |v| v.to_string()),
    }
}

fn symbol_text(ordering: Option<Ordering>) -> String {
    ordering.map_or_else(
        || MISSING.to_string(),
        |o| char::from(BignumCodec::symbol_for(o)).to_string(),
    )
}
