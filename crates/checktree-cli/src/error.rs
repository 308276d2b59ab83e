use std::path::PathBuf;

use checktree_core::CheckTreeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CheckTreeError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("forest file does not exist: {path}")]
    MissingPath { path: PathBuf },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use checktree_core::Forest;

    use super::CliError;

    #[test]
    fn missing_path_is_a_runtime_failure() {
        let error = CliError::MissingPath {
            path: PathBuf::from("nope.json"),
        };
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "forest file does not exist: nope.json");
    }

    #[test]
    fn invalid_argument_exits_with_usage_code() {
        let error = CliError::invalid("bad --set");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid argument: bad --set");
    }

    #[test]
    fn core_errors_keep_their_message() {
        let core = Forest::from_json("{").expect_err("truncated JSON");
        let expected = core.to_string();
        let error = CliError::from(core);
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), expected);
    }
}
