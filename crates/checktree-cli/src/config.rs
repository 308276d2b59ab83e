//! Environment fallbacks for command-line settings.
//!
//! Every setting resolves as flag, then environment, then default. The
//! `resolve_*` functions take the raw environment value so they can be
//! tested without touching the process environment.

use clap::ValueEnum;

use crate::error::{CliError, Result};
use crate::render::GuideStyle;

/// Guide style for `show`.
pub const GUIDES_ENV: &str = "CHECKTREE_GUIDES";
/// Compact JSON for `export`.
pub const COMPACT_ENV: &str = "CHECKTREE_COMPACT";
/// Print errors as a JSON object on stderr.
pub const JSON_ERRORS_ENV: &str = "CHECKTREE_JSON_ERRORS";
/// `tracing` filter directives for stderr logging.
pub const LOG_ENV: &str = "CHECKTREE_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Parse a truthy environment value (`1`, `true`, `yes`, `on`).
#[must_use]
pub fn is_truthy(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    matches!(value.as_str(), "1" | "true" | "yes" | "on")
}

#[must_use]
pub fn resolve_flag(flag: bool, env: Option<&str>) -> bool {
    flag || env.is_some_and(is_truthy)
}

pub fn resolve_guides(flag: Option<GuideStyle>, env: Option<&str>) -> Result<GuideStyle> {
    if let Some(style) = flag {
        return Ok(style);
    }
    match env.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => GuideStyle::from_str(raw, true)
            .map_err(|_| CliError::invalid(format!("{GUIDES_ENV}={raw} is not a guide style"))),
        None => Ok(GuideStyle::default()),
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[must_use]
pub fn compact(flag: bool) -> bool {
    resolve_flag(flag, env_var(COMPACT_ENV).as_deref())
}

#[must_use]
pub fn json_errors(flag: bool) -> bool {
    resolve_flag(flag, env_var(JSON_ERRORS_ENV).as_deref())
}

pub fn guides(flag: Option<GuideStyle>) -> Result<GuideStyle> {
    resolve_guides(flag, env_var(GUIDES_ENV).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for raw in ["1", "true", "YES", " on "] {
            assert!(is_truthy(raw), "{raw:?}");
        }
        for raw in ["0", "false", "no", "off", "", "maybe"] {
            assert!(!is_truthy(raw), "{raw:?}");
        }
    }

    #[test]
    fn flag_wins_over_environment() {
        assert!(resolve_flag(true, Some("0")));
        assert!(resolve_flag(false, Some("yes")));
        assert!(!resolve_flag(false, Some("off")));
        assert!(!resolve_flag(false, None));
    }

    #[test]
    fn guides_precedence() {
        assert_eq!(
            resolve_guides(Some(GuideStyle::Bold), Some("ascii")).expect("flag"),
            GuideStyle::Bold
        );
        assert_eq!(
            resolve_guides(None, Some("Double")).expect("env"),
            GuideStyle::Double
        );
        assert_eq!(resolve_guides(None, None).expect("default"), GuideStyle::Unicode);
        assert_eq!(resolve_guides(None, Some("  ")).expect("blank"), GuideStyle::Unicode);
    }

    #[test]
    fn unknown_guide_style_is_invalid_argument() {
        let error = resolve_guides(None, Some("fancy")).expect_err("unknown style");
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("CHECKTREE_GUIDES=fancy"));
    }
}
