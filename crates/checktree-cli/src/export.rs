use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use checktree_core::ExportFormat;
use clap::Args;

use crate::assign::load_tree;
use crate::config;
use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Forest JSON file.
    pub forest: PathBuf,

    /// Set a node and its descendants before exporting (`KEY=on|off`).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Single-line JSON [env: CHECKTREE_COMPACT].
    #[arg(long)]
    pub compact: bool,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run_export(args: ExportArgs) -> Result<()> {
    let format = if config::compact(args.compact) {
        ExportFormat::Compact
    } else {
        ExportFormat::Pretty
    };
    let tree = load_tree(&args.forest, &args.set)?;
    let mut json = tree.export_json(format)?;
    json.push('\n');

    match args.output {
        Some(path) => {
            fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "wrote export");
        }
        None => io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}
