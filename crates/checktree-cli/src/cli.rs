use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::export::{ExportArgs, run_export};
use crate::keys::{KeysArgs, run_keys};
use crate::show::{ShowArgs, run_show};

#[derive(Debug, Parser)]
#[command(
    name = "checktree",
    about = "Inspect, toggle, and export checkbox-tree state",
    version
)]
pub struct Cli {
    /// Print errors as a JSON object [env: CHECKTREE_JSON_ERRORS].
    #[arg(long, global = true)]
    pub json_errors: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every node key, depth-first.
    Keys(KeysArgs),

    /// Render the tree with checkboxes.
    Show(ShowArgs),

    /// Write the forest annotated with `checked` as JSON.
    Export(ExportArgs),
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Keys(args) => run_keys(args),
        Commands::Show(args) => run_show(args),
        Commands::Export(args) => run_export(args),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::error::CliError;
    use crate::export::ExportArgs;
    use crate::keys::KeysArgs;
    use crate::render::GuideStyle;
    use crate::show::ShowArgs;

    use super::{Cli, Commands, run};

    #[test]
    fn parses_repeated_set_flags_in_order() {
        let cli = Cli::try_parse_from([
            "checktree",
            "show",
            "forest.json",
            "--set",
            "1.0#a=on",
            "--set",
            "0/2.0#b=off",
            "--guides",
            "ascii",
        ])
        .expect("parse");
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.set, ["1.0#a=on", "0/2.0#b=off"]);
                assert_eq!(args.guides, Some(GuideStyle::Ascii));
            }
            other => panic!("expected show, got {other:?}"),
        }
    }

    #[test]
    fn json_errors_is_global() {
        let cli = Cli::try_parse_from(["checktree", "keys", "f.json", "--json-errors"])
            .expect("parse");
        assert!(cli.json_errors);
    }

    #[test]
    fn keys_command_dispatches_missing_path_error() {
        let result = run(Cli {
            json_errors: false,
            command: Commands::Keys(KeysArgs {
                forest: PathBuf::from("/tmp/checktree/does-not-exist.json"),
            }),
        });
        match result.expect_err("missing forest should fail") {
            CliError::MissingPath { path } => {
                assert_eq!(path, PathBuf::from("/tmp/checktree/does-not-exist.json"));
            }
            other => panic!("expected MissingPath, got {other}"),
        }
    }

    #[test]
    fn show_command_rejects_malformed_assignment_before_reading() {
        let result = run(Cli {
            json_errors: false,
            command: Commands::Show(ShowArgs {
                forest: PathBuf::from("/tmp/checktree/does-not-exist.json"),
                set: vec!["no-equals-sign".to_string()],
                guides: Some(GuideStyle::Ascii),
            }),
        });
        assert_eq!(result.expect_err("malformed").exit_code(), 2);
    }

    #[test]
    fn export_command_writes_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let forest = dir.path().join("forest.json");
        std::fs::write(&forest, r#"[{"name": "a"}]"#).expect("write forest");
        let output = dir.path().join("out.json");

        run(Cli {
            json_errors: false,
            command: Commands::Export(ExportArgs {
                forest,
                set: vec!["1.0#a=on".to_string()],
                compact: true,
                output: Some(output.clone()),
            }),
        })
        .expect("export");

        let written = std::fs::read_to_string(&output).expect("read output");
        assert_eq!(written, "[{\"name\":\"a\",\"checked\":true}]\n");
    }
}
