//! Environment Configuration Module
//!
//! Resolves the output directory from the command line, `FIXTURE_OUT_DIR`, or
//! the built-in default, in that order. Log filtering comes from `RUST_LOG`
//! when set, otherwise from the `--verbose` flag.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use frameworks_fixture_cli::DEFAULT_OUT_DIR;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the output directory
pub const OUT_DIR_VAR: &str = "FIXTURE_OUT_DIR";

/// Output directory for this process
pub fn resolve_out_dir(cli: Option<&Path>) -> PathBuf {
    resolve_out_dir_from(cli, env::var_os(OUT_DIR_VAR))
}

fn resolve_out_dir_from(cli: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(dir) = cli {
        return dir.to_path_buf();
    }
    match env_value {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_OUT_DIR),
    }
}

/// Log filter for this process
pub fn log_filter(verbose: bool) -> EnvFilter {
    log_filter_from(verbose, env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn log_filter_from(verbose: bool, env_value: Option<&str>) -> EnvFilter {
    match env_value {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(if verbose { "debug" } else { "info" }),
    }
}
