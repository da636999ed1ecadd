//! Commands Module
//!
//! The actions behind the `make_fixtures` subcommands.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use entities_fixture_catalog::OperandCatalog;
use thiserror::Error;
use tracing::info;
use usecases_fixture_generation::{Backend, FixtureEmitter, FixtureReplay, ParsedFixture, ReplayError};

use crate::output::{write_fixture, OutputError, WrittenFixture};

/// Command errors
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: ReplayError,
    },
}

/// Write the boundary catalog fixture into `out_dir/file_name`
pub fn generate(out_dir: &Path, file_name: &str, backend: Backend) -> Result<WrittenFixture, CommandError> {
    let catalog = OperandCatalog::boundary();
    let written = write_fixture(out_dir, file_name, &catalog, backend)?;
    info!(path = %written.path.display(), bytes = written.bytes, backend = %backend, "fixture written");
    Ok(written)
}

/// Replay the fixture at `path` and recompute every entry
pub fn verify(path: &Path) -> Result<ParsedFixture, CommandError> {
    let data = fs::read(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let replay_error = |source| CommandError::Replay {
        path: path.to_path_buf(),
        source,
    };
    let parsed = FixtureReplay::parse(&data).map_err(replay_error)?;
    parsed.verify().map_err(replay_error)?;
    Ok(parsed)
}

/// Human-readable summary of the stream `catalog` produces
pub fn describe(catalog: &OperandCatalog) -> String {
    let layout = FixtureEmitter::new(catalog).layout();
    let mut out = String::new();
    let _ = writeln!(out, "primary operands: {}", layout.primary);
    let _ = writeln!(out, "shift amounts:    {}", layout.shift);
    for &section in layout.section_order() {
        let size = match layout.fixed_size(section) {
            Some(bytes) => format!("{} bytes", bytes),
            None => "variable".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<18} {:>8} entries  {}",
            section.name(),
            layout.entries(section),
            size
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate(dir.path(), "fixtures.bin", Backend::Digits).unwrap();
        let parsed = verify(&written.path).unwrap();
        assert_eq!(parsed.primary().len(), 34);
        assert_eq!(parsed.shift_amounts().len(), 20);
    }

    #[test]
    fn test_verify_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = verify(&dir.path().join("absent.bin"));
        assert!(matches!(result, Err(CommandError::Read { .. })));
    }

    #[test]
    fn test_verify_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate(dir.path(), "fixtures.bin", Backend::Malachite).unwrap();
        let bytes = fs::read(&written.path).unwrap();
        fs::write(&written.path, &bytes[..bytes.len() - 10]).unwrap();
        let result = verify(&written.path);
        assert!(matches!(
            result,
            Err(CommandError::Replay {
                source: ReplayError::Truncated { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_describe_lists_every_section() {
        let text = describe(&OperandCatalog::boundary());
        assert!(text.contains("primary operands: 34"));
        assert!(text.contains("shift amounts:    20"));
        assert!(text.contains("arithmetic matrix"));
        assert!(text.contains("3468 entries"));
        assert!(text.contains("1156 bytes"));
    }
}
