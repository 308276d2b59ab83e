use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::assign::load_forest;
use crate::error::Result;
use crate::render;

#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    /// Forest JSON file.
    pub forest: PathBuf,
}

pub fn run_keys(args: KeysArgs) -> Result<()> {
    let forest = load_forest(&args.forest)?;
    let mut out = io::stdout().lock();
    for key in render::keys(&forest) {
        writeln!(out, "{key}")?;
    }
    Ok(())
}
