use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::assign::load_tree;
use crate::config;
use crate::error::Result;
use crate::render::{GuideStyle, render};

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Forest JSON file.
    pub forest: PathBuf,

    /// Set a node and its descendants before rendering (`KEY=on|off`).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Guide characters [env: CHECKTREE_GUIDES] [default: unicode].
    #[arg(long, value_enum)]
    pub guides: Option<GuideStyle>,
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let style = config::guides(args.guides)?;
    let tree = load_tree(&args.forest, &args.set)?;
    let text = render(tree.forest(), &tree.state(), style);
    io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}
