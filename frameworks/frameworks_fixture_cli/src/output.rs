//! Output Module
//!
//! Writes a fixture artifact to disk. The output directory is created if
//! missing. The stream goes to `<name>.tmp` through a buffered writer and is
//! renamed into place only after a successful flush and sync, so a failed run
//! never leaves a truncated file under the final name.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use entities_fixture_catalog::OperandCatalog;
use thiserror::Error;
use tracing::{debug, warn};
use usecases_fixture_generation::{Backend, FixtureEmitter, FixtureError};

/// Directory used when neither the command line nor the environment names one
pub const DEFAULT_OUT_DIR: &str = "bin";

/// Artifact file name inside the output directory
pub const DEFAULT_FILE_NAME: &str = "fixtures.bin";

/// Output errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("fixture generation failed: {0}")]
    Fixture(#[from] FixtureError),
}

/// A successfully written artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFixture {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Generate the fixture for `catalog` into `dir/file_name`
pub fn write_fixture(
    dir: &Path,
    file_name: &str,
    catalog: &OperandCatalog,
    backend: Backend,
) -> Result<WrittenFixture, OutputError> {
    debug!(dir = %dir.display(), file = file_name, backend = %backend, "writing fixture");
    write_atomically(dir, file_name, |writer| {
        Ok(FixtureEmitter::new(catalog).emit_with(backend, writer)?)
    })
}

/// Run `write` against `dir/<file_name>.tmp` and move the result into place
///
/// On failure the temporary file is removed and any existing artifact under
/// the final name is left as it was.
fn write_atomically<F>(dir: &Path, file_name: &str, write: F) -> Result<WrittenFixture, OutputError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<u64, OutputError>,
{
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    let tmp_path = dir.join(format!("{}.tmp", file_name));

    match write_stream(&tmp_path, write) {
        Ok(bytes) => {
            fs::rename(&tmp_path, &path).map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })?;
            Ok(WrittenFixture { path, bytes })
        }
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!(path = %tmp_path.display(), error = %cleanup, "could not remove partial fixture");
            }
            Err(err)
        }
    }
}

fn write_stream<F>(tmp_path: &Path, write: F) -> Result<u64, OutputError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<u64, OutputError>,
{
    let io_error = |source| OutputError::Write {
        path: tmp_path.to_path_buf(),
        source,
    };

    let file = File::create(tmp_path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let bytes = write(&mut writer)?;
    writer.flush().map_err(io_error)?;
    let file = writer.into_inner().map_err(|e| io_error(e.into_error()))?;
    file.sync_all().map_err(io_error)?;
    Ok(bytes)
}
