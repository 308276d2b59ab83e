#![forbid(unsafe_code)]

use clap::Parser;

use checktree::{Cli, config, logging, run};

fn main() {
    let cli = Cli::parse();
    let json_errors = config::json_errors(cli.json_errors);
    logging::init();

    if let Err(error) = run(cli) {
        if json_errors {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("{error}");
        }
        std::process::exit(error.exit_code());
    }
}
