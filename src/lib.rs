#![forbid(unsafe_code)]
//! Golden-test orchestrator for the Wenda compiler binaries
//!
//! goldrun sweeps a directory of test cases, invokes the compiler binary
//! matching each case's input convention, captures stdout/stderr/exit code,
//! and compares the normalized output against the case's expectation. Every
//! case yields exactly one verdict (PASS, FAIL or ERROR); FAIL and ERROR
//! cases additionally leave a side artifact under the report directory, and
//! the whole run is summarized in a single JSON document.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Case scope**: nothing that goes wrong inside a single case may panic or
//!   abort the run; it becomes that case's ERROR verdict.

pub mod cli;
pub mod convention;
pub mod locate;
pub mod normalize;
pub mod orchestrate;
pub mod report;
pub mod resolve;
pub mod runner;

pub use convention::{Binding, CONVENTIONS, Convention};
pub use normalize::normalize;
pub use orchestrate::RunConfig;
pub use report::{ConsoleReporter, Reporter, RunSummary};
pub use resolve::{Channel, ResolveError, ResolvedCase};
pub use runner::{ErrorReport, FailReport, Verdict};
