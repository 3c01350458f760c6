use std::{env, path::Path};

use anyhow::{Result, anyhow};
use clap::Parser;
use nwalign::align;

pub fn run_in_repo_root(args: &str) -> Result<()> {
    // The manifest directory is "[...]/nwalign-tests", so its parent is the repository root.
    // This does not depend on the current directory, which other tests may have changed already.
    env::set_current_dir(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .ok_or(anyhow!("No parent directory"))?,
    )?;

    if args.starts_with("align ") {
        let args = align::Cli::try_parse_from(args.split_whitespace())?;
        align::cli(args)
    } else {
        Err(anyhow!("Unknown subcommand in {args:?}"))
    }
}
