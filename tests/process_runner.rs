//! Process runner against a real shell
//!
//! `sh -c <code>` has the same calling shape as `sage -c <snippet>`, which
//! is enough to exercise spawning, capture, exit codes and the deadline.
#![cfg(unix)]

use sagemath_mcp::engine::{
    format_outcome, EngineRunner, ExitKind, InvocationRequest, ProcessRunner, NOT_FOUND_EXIT_CODE,
    TIMEOUT_EXIT_CODE,
};
use sagemath_mcp::tools::ToolRuntime;
use serde_json::json;
use std::os::unix::fs::PermissionsExt;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn sh() -> ProcessRunner {
    ProcessRunner::new("sh").with_kill_grace(Duration::from_millis(200))
}

#[tokio::test]
async fn test_captures_both_streams() {
    let outcome = sh()
        .run(InvocationRequest::code("echo '  4  '; echo note >&2", Duration::from_secs(10)))
        .await;

    assert_eq!(outcome.kind(), ExitKind::Success);
    assert_eq!(outcome.stdout(), "4");
    assert_eq!(outcome.stderr(), "note");
    assert_eq!(format_outcome(&outcome), "4\n\n[stderr]\nnote");
}

#[tokio::test]
async fn test_nonzero_exit_report() {
    let outcome = sh()
        .run(InvocationRequest::code("echo out; echo oops >&2; exit 3", Duration::from_secs(10)))
        .await;

    assert_eq!(outcome.exit_code(), 3);
    assert_eq!(outcome.kind(), ExitKind::NonZero);
    assert_eq!(
        format_outcome(&outcome),
        "Error running SageMath (code 3).\nstderr:\noops\n\nstdout:\nout"
    );
}

#[tokio::test]
async fn test_timeout_keeps_partial_output() {
    let start = Instant::now();
    let outcome = sh()
        .run(InvocationRequest::code("echo partial; sleep 5", Duration::from_secs(1)))
        .await;

    assert!(start.elapsed() < Duration::from_secs(4), "took {:?}", start.elapsed());
    assert_eq!(outcome.exit_code(), TIMEOUT_EXIT_CODE);
    assert_eq!(outcome.kind(), ExitKind::TimedOut);
    assert_eq!(outcome.stdout(), "partial");
    assert!(outcome.stderr().ends_with("Timed out"));
}

#[tokio::test]
async fn test_missing_executable() {
    let runner = ProcessRunner::new("/nonexistent/bin/sage");
    let outcome = runner
        .run(InvocationRequest::code("print(1)", Duration::from_secs(5)))
        .await;

    assert_eq!(outcome.exit_code(), NOT_FOUND_EXIT_CODE);
    assert_eq!(outcome.kind(), ExitKind::NotFound);
    assert_eq!(outcome.stderr(), "Sage command not found: /nonexistent/bin/sage");
    assert!(outcome.stdout().is_empty());
}

#[tokio::test]
async fn test_concurrent_invocations_are_independent() {
    let runner = sh();
    let (a, b) = tokio::join!(
        runner.run(InvocationRequest::code("sleep 0.2; echo a", Duration::from_secs(10))),
        runner.run(InvocationRequest::code("echo b; exit 1", Duration::from_secs(10))),
    );

    assert_eq!((a.exit_code(), a.stdout()), (0, "a"));
    assert_eq!((b.exit_code(), b.stdout()), (1, "b"));
}

#[tokio::test]
async fn test_version_query_names_permission_failure() {
    let temp = TempDir::new().unwrap();
    let sage = temp.path().join("sage");
    std::fs::write(&sage, "#!/bin/sh\necho 'SageMath version 10.4'\n").unwrap();
    std::fs::set_permissions(&sage, std::fs::Permissions::from_mode(0o644)).unwrap();
    let command = sage.display().to_string();

    let outcome = ProcessRunner::new(command.as_str())
        .run(InvocationRequest::version(Duration::from_secs(5)))
        .await;
    assert_eq!(outcome.exit_code(), NOT_FOUND_EXIT_CODE);

    let text = ToolRuntime::with_command(command.as_str())
        .execute("sage_version", json!({}))
        .await;
    assert!(
        text.starts_with(&format!("Failed to start Sage command {}:", command)),
        "{}",
        text
    );
    assert!(!text.contains("not found"));
}
