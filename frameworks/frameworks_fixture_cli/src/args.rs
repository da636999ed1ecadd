//! Command-Line Argument Parsing Module
//!
//! Uses clap for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use frameworks_fixture_cli::DEFAULT_FILE_NAME;
use usecases_fixture_generation::Backend;

/// Fixture generator command-line arguments
#[derive(Parser, Debug)]
#[command(name = "make_fixtures")]
#[command(about = "Generate the bignum golden fixture stream")]
pub struct FixtureArgs {
    /// Log section-level progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Action to run (defaults to `generate`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the boundary catalog fixture
    Generate(GenerateArgs),
    /// Replay an existing fixture and recompute every entry
    Verify {
        /// Fixture file to check
        path: PathBuf,
    },
    /// Print catalog cardinalities and section sizes
    Describe,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Output directory (falls back to $FIXTURE_OUT_DIR, then `bin`)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Artifact file name inside the output directory
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Arithmetic used to derive the matrices: malachite or digits
    #[arg(long, default_value_t = Backend::Malachite)]
    pub backend: Backend,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            out_dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            backend: Backend::default(),
        }
    }
}

impl FixtureArgs {
    /// The subcommand to run, with `generate` as the default
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Generate(GenerateArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_generates_with_defaults() {
        let args = FixtureArgs::try_parse_from(["make_fixtures"]).unwrap();
        assert!(!args.verbose);
        match args.into_command() {
            Command::Generate(generate) => assert_eq!(generate, GenerateArgs::default()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_options() {
        let args = FixtureArgs::try_parse_from([
            "make_fixtures",
            "-v",
            "generate",
            "--out-dir",
            "out",
            "--file-name",
            "big.bin",
            "--backend",
            "digits",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.into_command() {
            Command::Generate(generate) => {
                assert_eq!(generate.out_dir, Some(PathBuf::from("out")));
                assert_eq!(generate.file_name, "big.bin");
                assert_eq!(generate.backend, Backend::Digits);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = FixtureArgs::try_parse_from(["make_fixtures", "generate", "--backend", "gmp"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_takes_path() {
        let args = FixtureArgs::try_parse_from(["make_fixtures", "verify", "bin/fixtures.bin"]).unwrap();
        match args.into_command() {
            Command::Verify { path } => assert_eq!(path, PathBuf::from("bin/fixtures.bin")),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
