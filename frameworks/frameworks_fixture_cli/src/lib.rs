//! Frameworks Layer: Fixture Generator
//!
//! Drives fixture generation as a build-time step: resolves the output
//! location, writes the stream under a scoped file handle, and replays existing
//! artifacts for verification.
//!
//! ## Modules
//!
//! - **[`output`](output/index.html)**: Output directory bootstrap and
//!   temp-then-rename artifact writes
//!
//! - **[`commands`](commands/index.html)**: `generate`, `verify` and
//!   `describe` actions behind the `make_fixtures` binary
//!
//! ## See Also
//!
//! - [`usecases_fixture_generation`](../../usecases/usecases_fixture_generation/index.html): Emitter and replay reader
//! - [`entities_fixture_catalog`](../../entities/entities_fixture_catalog/index.html): Operand catalogs

pub mod commands;
pub mod output;

pub use commands::{describe, generate, verify, CommandError};
pub use output::{write_fixture, OutputError, WrittenFixture, DEFAULT_FILE_NAME, DEFAULT_OUT_DIR};
