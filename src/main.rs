//! # schema-prep CLI
//!
//! Binary entry point for the `schema-prep` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing the four positional arguments using `clap`.
//! - Initializing logging.
//! - Running the preparation pipeline and translating failures into
//!   user-friendly output and a non-zero exit code.
//!
//! The core logic lives in the library crate; the binary is a thin wrapper.

mod cli;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    cli.execute()
}
