//! Fixture Generator Binary Entry Point
//!
//! Generates the bignum golden fixture (by default `bin/fixtures.bin`), or
//! verifies and describes fixture streams.

use std::process;

mod args;
mod env;

use args::{Command, FixtureArgs};
use clap::Parser;
use entities_fixture_catalog::OperandCatalog;
use env::{log_filter, resolve_out_dir};
use frameworks_fixture_cli::{describe, generate, verify};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*};

fn main() {
    let args = FixtureArgs::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(args.verbose))
        .init();

    let result = match args.into_command() {
        Command::Generate(generate_args) => {
            let out_dir = resolve_out_dir(generate_args.out_dir.as_deref());
            generate(&out_dir, &generate_args.file_name, generate_args.backend).map(|_| ())
        }
        Command::Verify { path } => verify(&path).map(|parsed| {
            info!(
                path = %path.display(),
                primary = parsed.primary().len(),
                shift = parsed.shift_amounts().len(),
                "fixture ok"
            );
        }),
        Command::Describe => {
            print!("{}", describe(&OperandCatalog::boundary()));
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
