#![forbid(unsafe_code)]

//! `checktree` command-line front end for `checktree-core`.

pub mod assign;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod keys;
pub mod logging;
pub mod render;
pub mod show;

pub use cli::{Cli, run};
pub use error::{CliError, Result};
