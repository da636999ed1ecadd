//! Fixture Emitter Module
//!
//! Walks an [`OperandCatalog`] and writes the full fixture stream to any
//! [`Write`] sink in one deterministic pass. The arithmetic is performed by a
//! chosen [`BigArithmetic`] implementation; every implementation must yield a
//! byte-identical stream.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use entities_bignum::{BigArithmetic, BigNumber, DigitNumber};
use entities_fixture_catalog::OperandCatalog;
use infrastructure_bignum_encoding::{BignumCodec, EncodeError};
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::{FixtureLayout, Section};

/// Fixture generation errors
///
/// Any error aborts generation; a partially written stream is not a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A value does not fit its field in the wire format
    #[error("cannot encode {section}: {source}")]
    Encode {
        section: Section,
        #[source]
        source: EncodeError,
    },
    /// Writing to the sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Integer arithmetic used to derive the matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// malachite-backed [`BigNumber`]
    #[default]
    Malachite,
    /// explicit base-256 [`DigitNumber`]
    Digits,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Malachite => f.write_str("malachite"),
            Backend::Digits => f.write_str("digits"),
        }
    }
}

/// Unknown backend name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backend {0:?} (expected \"malachite\" or \"digits\")")]
pub struct UnknownBackend(pub String);

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "malachite" => Ok(Backend::Malachite),
            "digits" => Ok(Backend::Digits),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

/// Writes fixture streams for one catalog
pub struct FixtureEmitter<'a> {
    catalog: &'a OperandCatalog,
}

impl<'a> FixtureEmitter<'a> {
    pub fn new(catalog: &'a OperandCatalog) -> Self {
        Self { catalog }
    }

    /// Layout of the stream this emitter produces
    pub fn layout(&self) -> FixtureLayout {
        FixtureLayout::for_counts(
            self.catalog.primary().len(),
            self.catalog.shift_amounts().len(),
        )
    }

    /// Emit the stream into `sink` using `backend`
    ///
    /// # Returns
    ///
    /// Number of bytes written
    pub fn emit_with<W: Write>(&self, backend: Backend, sink: &mut W) -> Result<u64, FixtureError> {
        match backend {
            Backend::Malachite => self.emit::<BigNumber, W>(sink),
            Backend::Digits => self.emit::<DigitNumber, W>(sink),
        }
    }

    /// Emit the stream into a fresh buffer using `backend`
    pub fn to_bytes(&self, backend: Backend) -> Result<Vec<u8>, FixtureError> {
        let mut buf = Vec::new();
        self.emit_with(backend, &mut buf)?;
        Ok(buf)
    }

    /// Emit the stream into `sink`, computing with `N`
    ///
    /// The sink is written row by row; nothing is flushed here, so callers
    /// owning a buffered sink flush it once generation succeeds.
    pub fn emit<N: BigArithmetic, W: Write>(&self, sink: &mut W) -> Result<u64, FixtureError> {
        let mut sink = CountingSink::new(sink);
        self.emit_sections::<N, W>(&mut sink)?;

        info!(
            primary = self.catalog.primary().len(),
            shift = self.catalog.shift_bits().len(),
            bytes = sink.written,
            "fixture stream emitted"
        );
        Ok(sink.written)
    }

    fn emit_sections<N: BigArithmetic, W: Write>(
        &self,
        sink: &mut CountingSink<'_, W>,
    ) -> Result<(), FixtureError> {
        let primary: Vec<N> = self.catalog.primary().iter().map(|v| v.convert()).collect();
        let shift_bits = self.catalog.shift_bits();
        let mut row = Vec::new();

        let primary_count = BigNumber::from_u64(primary.len() as u64);
        sink.write_all(&fixed32(&primary_count, Section::PrimaryCount)?)?;
        self.section_done(Section::PrimaryCount, sink);

        let shift_count = BigNumber::from_u64(shift_bits.len() as u64);
        sink.write_all(&fixed32(&shift_count, Section::ShiftCount)?)?;
        self.section_done(Section::ShiftCount, sink);

        for value in &primary {
            integer(&mut row, value, Section::PrimaryCatalog)?;
        }
        sink.flush_row(&mut row)?;
        self.section_done(Section::PrimaryCatalog, sink);

        for amount in self.catalog.shift_amounts() {
            row.extend_from_slice(&fixed32(amount, Section::ShiftCatalog)?);
        }
        sink.flush_row(&mut row)?;
        self.section_done(Section::ShiftCatalog, sink);

        for a in &primary {
            for b in &primary {
                integer(&mut row, &a.plus(b), Section::ArithmeticMatrix)?;
                integer(&mut row, &a.times(b), Section::ArithmeticMatrix)?;
                integer(&mut row, &a.minus(b), Section::ArithmeticMatrix)?;
            }
            sink.flush_row(&mut row)?;
        }
        self.section_done(Section::ArithmeticMatrix, sink);

        for a in &primary {
            for &bits in shift_bits {
                integer(&mut row, &a.shr(bits), Section::ShiftMatrix)?;
            }
            sink.flush_row(&mut row)?;
        }
        self.section_done(Section::ShiftMatrix, sink);

        for a in &primary {
            for b in &primary {
                row.push(BignumCodec::compare_symbol(a, b));
            }
            sink.flush_row(&mut row)?;
        }
        self.section_done(Section::ComparisonMatrix, sink);

        Ok(())
    }

    fn section_done<W: Write>(&self, section: Section, sink: &mut CountingSink<'_, W>) {
        debug!(
            section = %section,
            entries = self.layout().entries(section),
            offset = sink.written,
            "section written"
        );
        sink.sections.push((section, sink.written));
    }
}

fn fixed32(value: &BigNumber, section: Section) -> Result<[u8; 4], FixtureError> {
    BignumCodec::encode_fixed32(value).map_err(|source| FixtureError::Encode { section, source })
}

fn integer<N: BigArithmetic>(row: &mut Vec<u8>, value: &N, section: Section) -> Result<(), FixtureError> {
    BignumCodec::encode_into(row, value)
        .map(|_| ())
        .map_err(|source| FixtureError::Encode { section, source })
}

/// Byte-counting wrapper around the caller's sink
struct CountingSink<'w, W: Write> {
    inner: &'w mut W,
    written: u64,
    /// End offset of each completed section
    sections: Vec<(Section, u64)>,
}

impl<'w, W: Write> CountingSink<'w, W> {
    fn new(inner: &'w mut W) -> Self {
        Self {
            inner,
            written: 0,
            sections: Vec::new(),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn flush_row(&mut self, row: &mut Vec<u8>) -> std::io::Result<()> {
        self.write_all(row)?;
        row.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> OperandCatalog {
        OperandCatalog::builder()
            .primary(0u32)
            .primary(1u32)
            .primary(127u32)
            .primary(128u32)
            .build()
            .unwrap()
    }

    #[test]
    fn test_header_bytes() {
        let bytes = FixtureEmitter::new(&small_catalog())
            .to_bytes(Backend::Malachite)
            .unwrap();
        assert_eq!(&bytes[..8], &[4, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_catalog_dump_follows_header() {
        let bytes = FixtureEmitter::new(&small_catalog())
            .to_bytes(Backend::Malachite)
            .unwrap();
        // 0, 1, 127, 128
        assert_eq!(&bytes[8..13], &[0, 0, 0, 0, b'+']);
        assert_eq!(&bytes[13..19], &[1, 0, 0, 0, b'+', 0x01]);
        assert_eq!(&bytes[19..25], &[1, 0, 0, 0, b'+', 0x7F]);
        assert_eq!(&bytes[25..31], &[1, 0, 0, 0, b'+', 0x80]);
    }

    #[test]
    fn test_first_pairs_of_arithmetic_matrix() {
        let bytes = FixtureEmitter::new(&small_catalog())
            .to_bytes(Backend::Malachite)
            .unwrap();
        let matrix = &bytes[31..];
        // (0, 0): 0, 0, 0
        assert_eq!(&matrix[..15], &[0, 0, 0, 0, b'+', 0, 0, 0, 0, b'+', 0, 0, 0, 0, b'+']);
        // (0, 1): 1, 0, -1
        assert_eq!(&matrix[15..21], &[1, 0, 0, 0, b'+', 1]);
        assert_eq!(&matrix[21..26], &[0, 0, 0, 0, b'+']);
        assert_eq!(&matrix[26..32], &[1, 0, 0, 0, b'-', 1]);
    }

    #[test]
    fn test_comparison_matrix_is_trailing() {
        let bytes = FixtureEmitter::new(&small_catalog())
            .to_bytes(Backend::Malachite)
            .unwrap();
        let symbols = &bytes[bytes.len() - 16..];
        assert_eq!(symbols, b"=<<<>=<<>>=<>>>=");
    }

    #[test]
    fn test_bytes_written_matches_buffer() {
        let catalog = OperandCatalog::boundary();
        let mut sink = Vec::new();
        let written = FixtureEmitter::new(&catalog)
            .emit_with(Backend::Malachite, &mut sink)
            .unwrap();
        assert_eq!(written, sink.len() as u64);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("malachite".parse::<Backend>(), Ok(Backend::Malachite));
        assert_eq!("digits".parse::<Backend>(), Ok(Backend::Digits));
        assert!("gmp".parse::<Backend>().is_err());
        assert_eq!(Backend::default().to_string(), "malachite");
    }

    #[test]
    fn test_sink_failure_aborts() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = FixtureEmitter::new(&small_catalog()).emit_with(Backend::Digits, &mut FailingSink);
        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn test_every_section_is_recorded_in_order() {
        let catalog = OperandCatalog::builder()
            .primary(0u32)
            .primary(1u32)
            .primary(127u32)
            .primary(128u32)
            .shift_amount(1u32)
            .shift_amount(8u32)
            .build()
            .unwrap();
        let emitter = FixtureEmitter::new(&catalog);
        let layout = emitter.layout();
        let mut buf = Vec::new();
        let mut sink = CountingSink::new(&mut buf);
        emitter.emit_sections::<DigitNumber, _>(&mut sink).unwrap();

        let order: Vec<Section> = sink.sections.iter().map(|&(section, _)| section).collect();
        assert_eq!(order, layout.section_order().to_vec());
        assert_eq!(sink.sections[0], (Section::PrimaryCount, 4));
        assert_eq!(sink.sections[1], (Section::ShiftCount, 8));
        // 0, 1, 127, 128 encode to 5 + 6 + 6 + 6 bytes
        assert_eq!(sink.sections[2], (Section::PrimaryCatalog, 31));
        assert_eq!(sink.sections[3], (Section::ShiftCatalog, 39));
        let written = sink.written;
        assert_eq!(sink.sections[6], (Section::ComparisonMatrix, written));
        assert_eq!(written - sink.sections[5].1, layout.entries(Section::ComparisonMatrix));
        assert_eq!(written, buf.len() as u64);
    }
}
