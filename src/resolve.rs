//! Case resolution
//!
//! Pure metadata derivation from a case directory: which input artifact
//! applies, which expectation artifact and comparison channel, which
//! executable binding, and which exit code to expect. The resolver never
//! invokes an executable.
//!
//! Check order is fixed: missing input, then missing expectation, then an
//! unparsable exit-code file. Executable location happens after resolution
//! and contributes the fourth failure kind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::convention::{Binding, CONVENTIONS};

/// Why a case could not be resolved or its executable located.
///
/// The `Display` strings double as ERROR-verdict reasons in console output
/// and report artifacts.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("missing input artifact")]
    MissingInput,

    #[error("missing expectation artifact")]
    MissingExpectation,

    #[error("invalid exit code in {}: {}", .path.display(), .reason)]
    InvalidExitCode { path: PathBuf, reason: String },

    #[error("missing executable: {}", .path.display())]
    MissingExecutable { path: PathBuf },
}

/// Which captured stream the case is judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Stdout,
    Stderr,
}

/// The expectation artifact and comparison mode for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub channel: Channel,
    pub path: PathBuf,
}

/// A fully resolved case, ready to run.
#[derive(Debug, Clone)]
pub struct ResolvedCase {
    /// Case directory name; unique within a run.
    pub name: String,
    pub input: PathBuf,
    pub binding: Binding,
    pub expectation: Expectation,
    pub expected_exit: i32,
}

/// Derive a runnable description of the case in `dir`.
pub fn resolve_case(dir: &Path) -> Result<ResolvedCase, ResolveError> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (input, binding) = resolve_input(dir)?;
    let expectation = resolve_expectation(dir)?;
    let expected_exit = resolve_exit_code(dir)?;

    Ok(ResolvedCase {
        name,
        input,
        binding,
        expectation,
        expected_exit,
    })
}

/// The first existing input name across conventions decides both the input
/// artifact and the executable binding.
fn resolve_input(dir: &Path) -> Result<(PathBuf, Binding), ResolveError> {
    for convention in CONVENTIONS {
        for input_name in convention.input_names {
            let path = dir.join(input_name);
            if path.is_file() {
                return Ok((path, convention.binding));
            }
        }
    }
    Err(ResolveError::MissingInput)
}

/// A stderr expectation switches the whole case to stderr comparison;
/// otherwise the first existing stdout-expectation name wins.
fn resolve_expectation(dir: &Path) -> Result<Expectation, ResolveError> {
    for convention in CONVENTIONS {
        if let Some(stderr_name) = convention.stderr_name {
            let path = dir.join(stderr_name);
            if path.is_file() {
                return Ok(Expectation {
                    channel: Channel::Stderr,
                    path,
                });
            }
        }
    }
    for convention in CONVENTIONS {
        for stdout_name in convention.stdout_names {
            let path = dir.join(stdout_name);
            if path.is_file() {
                return Ok(Expectation {
                    channel: Channel::Stdout,
                    path,
                });
            }
        }
    }
    Err(ResolveError::MissingExpectation)
}

fn resolve_exit_code(dir: &Path) -> Result<i32, ResolveError> {
    for convention in CONVENTIONS {
        let path = dir.join(convention.exit_name);
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(|e| ResolveError::InvalidExitCode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        return text
            .trim()
            .parse::<i32>()
            .map_err(|e| ResolveError::InvalidExitCode {
                path,
                reason: e.to_string(),
            });
    }
    Ok(0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn case_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn latin_input_selects_primary() {
        let dir = case_dir(&[("input.pg", "x"), ("expected.out", "y")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.binding, Binding::Primary);
        assert_eq!(case.expectation.channel, Channel::Stdout);
        assert_eq!(case.expected_exit, 0);
    }

    #[test]
    fn native_input_selects_localized() {
        let dir = case_dir(&[("输入.文达", "x"), ("期望.输出", "y")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.binding, Binding::Localized);
    }

    #[test]
    fn legacy_native_input_spelling_still_resolves() {
        let dir = case_dir(&[("input.文达", "x"), ("expected.out", "y")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.binding, Binding::Localized);
    }

    #[test]
    fn latin_input_wins_over_native() {
        let dir = case_dir(&[("input.pg", "x"), ("输入.文达", "x"), ("expected.out", "y")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.binding, Binding::Primary);
        assert!(case.input.ends_with("input.pg"));
    }

    #[test]
    fn stdout_fallback_name() {
        let dir = case_dir(&[("input.pg", "x"), ("expected.txt", "y")]);
        let case = resolve_case(dir.path()).unwrap();
        assert!(case.expectation.path.ends_with("expected.txt"));
    }

    #[test]
    fn preferred_stdout_name_wins_over_fallback() {
        let dir = case_dir(&[("input.pg", "x"), ("expected.out", "a"), ("expected.txt", "b")]);
        let case = resolve_case(dir.path()).unwrap();
        assert!(case.expectation.path.ends_with("expected.out"));
    }

    #[test]
    fn stderr_expectation_switches_channel() {
        let dir = case_dir(&[("input.pg", "x"), ("expected.out", "y"), ("期望.错误", "z")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.expectation.channel, Channel::Stderr);
        assert!(case.expectation.path.ends_with("期望.错误"));
    }

    #[test]
    fn exit_code_file_is_parsed() {
        let dir = case_dir(&[("input.pg", "x"), ("expected.out", "y"), ("expected.exit", " 3\n")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.expected_exit, 3);
    }

    #[test]
    fn native_exit_code_file_is_parsed() {
        let dir = case_dir(&[("输入.文达", "x"), ("期望.输出", "y"), ("期望.退出", "2")]);
        let case = resolve_case(dir.path()).unwrap();
        assert_eq!(case.expected_exit, 2);
    }

    #[test]
    fn unparsable_exit_code_is_an_error() {
        let dir = case_dir(&[("input.pg", "x"), ("expected.out", "y"), ("expected.exit", "three")]);
        let err = resolve_case(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidExitCode { .. }));
        assert!(err.to_string().starts_with("invalid exit code"));
    }

    #[test]
    fn empty_dir_reports_missing_input_first() {
        let dir = case_dir(&[]);
        let err = resolve_case(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingInput));
    }

    #[test]
    fn input_without_expectation_reports_missing_expectation() {
        let dir = case_dir(&[("input.pg", "x")]);
        let err = resolve_case(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingExpectation));
    }

    #[test]
    fn missing_input_outranks_bad_exit_code() {
        let dir = case_dir(&[("expected.out", "y"), ("expected.exit", "three")]);
        let err = resolve_case(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingInput));
    }
}
