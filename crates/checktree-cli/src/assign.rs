//! Forest loading and `--set KEY=VALUE` assignments.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use checktree_core::{CheckTree, Forest};

use crate::error::{CliError, Result};

/// One `--set KEY=VALUE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: bool,
}

impl FromStr for Assignment {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self> {
        // Labels may contain '=', so split on the last one.
        let Some((key, value)) = raw.rsplit_once('=') else {
            return Err(CliError::invalid(format!(
                "assignment `{raw}` must look like KEY=on|off"
            )));
        };
        if key.is_empty() {
            return Err(CliError::invalid(format!("assignment `{raw}` has an empty key")));
        }
        let value = parse_check_value(value).ok_or_else(|| {
            CliError::invalid(format!(
                "assignment `{raw}`: `{value}` is not one of on/off, true/false, 1/0, yes/no, check/uncheck"
            ))
        })?;
        Ok(Self {
            key: key.to_string(),
            value,
        })
    }
}

fn parse_check_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" | "check" => Some(true),
        "off" | "false" | "0" | "no" | "uncheck" => Some(false),
        _ => None,
    }
}

/// Parse every raw `--set` value, failing on the first malformed one.
pub fn parse_assignments(raw: &[String]) -> Result<Vec<Assignment>> {
    raw.iter().map(|item| item.parse()).collect()
}

pub fn load_forest(path: &Path) -> Result<Forest> {
    if !path.exists() {
        return Err(CliError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let forest = Forest::from_json(&text)?;
    tracing::debug!(path = %path.display(), nodes = forest.node_count(), "loaded forest");
    Ok(forest)
}

/// Load `path` and apply `assignments` in order.
///
/// Assignments naming a key the forest does not have are skipped with a
/// warning.
pub fn load_tree(path: &Path, assignments: &[String]) -> Result<CheckTree> {
    let assignments = parse_assignments(assignments)?;
    let mut tree = CheckTree::new(load_forest(path)?);
    for assignment in &assignments {
        if !tree.state().contains_key(&assignment.key) {
            tracing::warn!(key = %assignment.key, "assignment targets unknown key");
            continue;
        }
        tree.set(&assignment.key, assignment.value);
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn accepts_every_value_spelling() {
        for (raw, expected) in [
            ("1.0#a=on", true),
            ("1.0#a=TRUE", true),
            ("1.0#a=1", true),
            ("1.0#a=yes", true),
            ("1.0#a=check", true),
            ("1.0#a=off", false),
            ("1.0#a=false", false),
            ("1.0#a=0", false),
            ("1.0#a=No", false),
            ("1.0#a=uncheck", false),
        ] {
            let parsed: Assignment = raw.parse().expect(raw);
            assert_eq!(parsed.key, "1.0#a");
            assert_eq!(parsed.value, expected, "{raw}");
        }
    }

    #[test]
    fn label_may_contain_equals() {
        let parsed: Assignment = "1.0#x=y=on".parse().expect("parse");
        assert_eq!(parsed.key, "1.0#x=y");
        assert!(parsed.value);
    }

    #[test]
    fn malformed_assignments_are_invalid_arguments() {
        for raw in ["1.0#a", "=on", "1.0#a=maybe", "1.0#a="] {
            let error = raw.parse::<Assignment>().expect_err(raw);
            assert_eq!(error.exit_code(), 2, "{raw}");
        }
    }

    #[test]
    fn parse_assignments_stops_at_first_error() {
        let raw = vec!["1.0#a=on".to_string(), "bogus".to_string()];
        let error = parse_assignments(&raw).expect_err("bogus");
        assert!(error.to_string().contains("bogus"));
    }

    #[test]
    fn missing_forest_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        match load_forest(&path).expect_err("missing") {
            CliError::MissingPath { path: reported } => assert_eq!(reported, path),
            other => panic!("expected MissingPath, got {other}"),
        }
    }

    #[test]
    fn load_tree_applies_assignments_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forest.json");
        let mut file = fs::File::create(&path).expect("create");
        write!(
            file,
            r#"[{{"name": "r", "children": [{{"name": "a"}}, {{"name": "b"}}]}}]"#
        )
        .expect("write");

        let tree = load_tree(
            &path,
            &[
                "1.0#r=on".to_string(),
                "0/2.1#b=off".to_string(),
                "9.9#ghost=on".to_string(),
            ],
        )
        .expect("load");
        assert!(tree.is_checked("1.0#r"));
        assert!(tree.is_checked("0/2.0#a"));
        assert!(!tree.is_checked("0/2.1#b"));
        assert!(!tree.is_checked("9.9#ghost"));
    }
}
