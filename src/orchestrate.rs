//! Run orchestration
//!
//! Drives the full pipeline: verify the case root, discover case directories,
//! run each in lexicographic order, report every verdict as it lands, persist
//! the aggregate summary, and compute the process exit code.
//!
//! Cases are strictly sequential; each subprocess runs to completion before
//! the next case starts, and no state other than the append-only summary is
//! shared between cases.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{CliError, CliResult, ExitCode};
use crate::report::{self, CaseRecord, Reporter, RunSummary};
use crate::resolve;
use crate::runner::{self, ErrorReport, Verdict};

/// Run-wide configuration, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory whose immediate subdirectories are the cases.
    pub cases_dir: PathBuf,
    /// Destination for side artifacts and the summary document.
    pub report_dir: PathBuf,
    /// Directory holding the executables under test.
    pub bin_dir: PathBuf,
    /// Working directory for the executables under test.
    pub root: PathBuf,
    /// Forward `--quiet` to the executable under test.
    pub quiet: bool,
}

/// Execute one full run.
///
/// Per-case failures become ERROR verdicts and never abort the sweep; only
/// run-level failures (missing case root, unwritable report directory or
/// summary) surface as errors, with the orchestration exit code.
pub fn run(config: &RunConfig, reporter: &mut dyn Reporter) -> CliResult<ExitCode> {
    if !config.cases_dir.is_dir() {
        return Err(CliError::new(
            format!("case directory not found: {}", config.cases_dir.display()),
            ExitCode::DISCOVERY,
        ));
    }

    let cases = discover_cases(&config.cases_dir)?;
    reporter.on_discovery_complete(cases.len());

    fs::create_dir_all(&config.report_dir).map_err(|e| {
        CliError::new(
            format!(
                "could not create report directory {}: {}",
                config.report_dir.display(),
                e
            ),
            ExitCode::DISCOVERY,
        )
    })?;

    let mut summary = RunSummary::new();
    for case_dir in &cases {
        let name = case_name(case_dir);
        let verdict = match resolve::resolve_case(case_dir) {
            Ok(case) => runner::run_case(&case, config),
            Err(e) => Verdict::Error(ErrorReport::new(e.to_string())),
        };
        reporter.on_case_complete(&name, &verdict);
        report::emit_case_artifact(&config.report_dir, &name, &verdict);
        summary.push(CaseRecord { name, verdict });
    }

    report::write_summary(&config.report_dir, &summary).map_err(|e| {
        CliError::new(
            format!("could not write run summary: {e}"),
            ExitCode::DISCOVERY,
        )
    })?;

    reporter.on_run_complete(&summary);

    if summary.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Immediate subdirectories of the case root, sorted lexicographically by
/// name. The order fixes console and report ordering only; verdicts do not
/// depend on it.
fn discover_cases(cases_dir: &Path) -> CliResult<Vec<PathBuf>> {
    let entries = fs::read_dir(cases_dir).map_err(|e| {
        CliError::new(
            format!("could not read case directory {}: {}", cases_dir.display(), e),
            ExitCode::DISCOVERY,
        )
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            CliError::new(
                format!("could not read case directory {}: {}", cases_dir.display(), e),
                ExitCode::DISCOVERY,
            )
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by_key(|dir| case_name(dir));
    Ok(dirs)
}

fn case_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
