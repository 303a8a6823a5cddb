//! Outcome formatting
//!
//! Pure functions turning an [`InvocationOutcome`] into the single text
//! block returned to the caller.

use crate::engine::runner::{ExitKind, InvocationOutcome};
use std::time::Duration;

/// Placeholder for an empty stdout on success
pub const NO_STDOUT: &str = "(no stdout)";

/// Placeholder for an empty stream in a failure report
pub const EMPTY: &str = "(empty)";

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}

fn failure_report(header: &str, outcome: &InvocationOutcome) -> String {
    format!(
        "{}\nstderr:\n{}\n\nstdout:\n{}",
        header,
        or_placeholder(outcome.stderr(), EMPTY),
        or_placeholder(outcome.stdout(), EMPTY),
    )
}

/// Format a code invocation outcome
///
/// The failure shape is the same for every failure kind; the exit code in
/// the header tells a reader which one it was (124 timeout, 127 missing
/// executable, anything else from the engine itself).
pub fn format_outcome(outcome: &InvocationOutcome) -> String {
    if outcome.succeeded() {
        let body = or_placeholder(outcome.stdout(), NO_STDOUT);
        if outcome.stderr().is_empty() {
            body.to_string()
        } else {
            format!("{}\n\n[stderr]\n{}", body, outcome.stderr())
        }
    } else {
        failure_report(
            &format!("Error running SageMath (code {}).", outcome.exit_code()),
            outcome,
        )
    }
}

/// Format the outcome of `<cmd> --version`
///
/// Discovery callers get a one-line message for the runner-level failures
/// instead of the full failure report.
pub fn format_version(outcome: &InvocationOutcome, command: &str, timeout: Duration) -> String {
    match outcome.kind() {
        // The runner message names the actual spawn failure
        ExitKind::NotFound if !outcome.stderr().is_empty() => outcome.stderr().to_string(),
        ExitKind::NotFound => format!("Sage command not found: {}", command),
        ExitKind::TimedOut => format!(
            "Sage command timed out after {}s: {} --version",
            timeout.as_secs(),
            command
        ),
        ExitKind::Success => or_placeholder(outcome.stdout(), NO_STDOUT).to_string(),
        ExitKind::NonZero => failure_report(
            &format!("Sage --version failed (code {}).", outcome.exit_code()),
            outcome,
        ),
    }
}
