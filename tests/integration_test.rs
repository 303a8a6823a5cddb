//! Integration tests for sagemath-mcp
//!
//! Drives the tool dispatcher end to end against a scripted engine, so no
//! Sage installation is needed.

use async_trait::async_trait;
use quickcheck_macros::quickcheck;
use sagemath_mcp::engine::{
    format_outcome, EngineRunner, Invocation, InvocationOutcome, InvocationRequest,
};
use sagemath_mcp::server::SageMathServer;
use sagemath_mcp::tools::{catalog, CatalogScope, ToolRuntime, TOOL_NAMES};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers every request with one outcome and keeps what it was asked
struct ScriptedEngine {
    outcome: InvocationOutcome,
    seen: Mutex<Vec<InvocationRequest>>,
}

impl ScriptedEngine {
    fn new(outcome: InvocationOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<InvocationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl EngineRunner for ScriptedEngine {
    async fn run(&self, request: InvocationRequest) -> InvocationOutcome {
        self.seen.lock().unwrap().push(request);
        self.outcome.clone()
    }

    fn command(&self) -> &str {
        "/opt/sage/sage"
    }
}

fn runtime(engine: &Arc<ScriptedEngine>) -> ToolRuntime {
    ToolRuntime::new(engine.clone())
}

#[tokio::test]
async fn test_eval_returns_bare_stdout() {
    let engine = ScriptedEngine::new(InvocationOutcome::completed(0, "4\n", ""));
    let text = runtime(&engine)
        .execute("sage_eval", json!({"expression": "2+2"}))
        .await;

    assert_eq!(text, "4");
    let requests = engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].timeout, Duration::from_secs(20));
    assert!(requests[0].snippet().unwrap().contains("expr = '2+2'\n"));
}

#[tokio::test]
async fn test_run_timeout_report() {
    let engine = ScriptedEngine::new(InvocationOutcome::timed_out("partial", ""));
    let text = runtime(&engine)
        .execute("sage_run", json!({"code": "print('partial')\nsleep(60)", "timeout_seconds": 1}))
        .await;

    assert_eq!(
        text,
        "Error running SageMath (code 124).\nstderr:\nTimed out\n\nstdout:\npartial"
    );
    assert_eq!(engine.requests()[0].timeout, Duration::from_secs(1));
}

#[tokio::test]
async fn test_run_passes_code_verbatim() {
    let engine = ScriptedEngine::new(InvocationOutcome::completed(0, "", ""));
    let code = "for i in range(3):\n    print(i)";
    let text = runtime(&engine).execute("sage_run", json!({ "code": code })).await;

    assert_eq!(text, "(no stdout)");
    assert_eq!(engine.requests()[0].snippet(), Some(code));
}

#[tokio::test]
async fn test_version_not_found_message() {
    let engine = ScriptedEngine::new(InvocationOutcome::not_found(
        "Sage command not found: /opt/sage/sage",
    ));
    let text = runtime(&engine).execute("sage_version", json!({})).await;

    assert_eq!(text, "Sage command not found: /opt/sage/sage");
    assert_eq!(engine.requests()[0].invocation, Invocation::Version);
}

#[tokio::test]
async fn test_eval_not_found_uses_failure_report() {
    let engine = ScriptedEngine::new(InvocationOutcome::not_found(
        "Sage command not found: /opt/sage/sage",
    ));
    let text = runtime(&engine)
        .execute("sage_eval", json!({"expression": "1"}))
        .await;

    assert!(text.starts_with("Error running SageMath (code 127)."));
    assert!(text.contains("Sage command not found: /opt/sage/sage"));
    assert!(text.ends_with("stdout:\n(empty)"));
}

#[tokio::test]
async fn test_fusion_rules_snippet_and_timeout() {
    let engine = ScriptedEngine::new(InvocationOutcome::completed(0, "Rank: 3", ""));
    let text = runtime(&engine)
        .execute(
            "fusion_ring_fusion_rules",
            json!({"ct": "A1", "k": 2, "fusion_labels": "a", "cyclotomic_order": 24}),
        )
        .await;

    assert_eq!(text, "Rank: 3");
    let request = &engine.requests()[0];
    assert_eq!(request.timeout, Duration::from_secs(90));
    let snippet = request.snippet().unwrap();
    assert!(snippet.contains("ct_text = 'A1'\n"));
    assert!(snippet.contains("kwargs['k'] = 2\n"));
    assert!(snippet.contains("cyclo = 24\n"));
    assert!(snippet.contains("lbls = 'a'\n"));
    assert!(snippet.contains("FR.Nk_ij(a, b, c)"));
}

#[tokio::test]
async fn test_hostile_expression_stays_data() {
    let engine = ScriptedEngine::new(InvocationOutcome::completed(0, "", ""));
    let hostile = "x'\nimport os\nos.system('rm -rf /')\n#";
    runtime(&engine)
        .execute(
            "fusion_ring_eval",
            json!({"ct": "A1", "k": 1, "expression": hostile}),
        )
        .await;

    let snippet = engine.requests()[0].snippet().unwrap().to_string();
    assert!(!snippet.lines().any(|line| line.starts_with("import os")));
    assert!(snippet.contains(r"expr = 'x\'\nimport os\nos.system(\'rm -rf /\')\n#'"));
}

#[tokio::test]
async fn test_catalog_never_runs_engine() {
    let engine = ScriptedEngine::new(InvocationOutcome::completed(0, "", ""));
    let runtime = runtime(&engine);

    for scope in CatalogScope::NAMES {
        let text = runtime
            .execute("fusion_ring_api_catalog", json!({ "scope": scope }))
            .await;
        assert_eq!(text, catalog(scope));
    }
    assert!(engine.requests().is_empty());
}

#[tokio::test]
async fn test_catalog_all_covers_every_scope() {
    let all = catalog("all");
    for scope in ["fusion_ring", "fusion_double", "f_matrix"] {
        for line in catalog(scope).lines().filter(|l| l.starts_with("- ")) {
            assert!(all.contains(line), "{} missing from all", line);
        }
    }
    assert!(catalog("bogus").contains("Invalid scope"));
}

#[tokio::test]
async fn test_unknown_tool_and_bad_arguments() {
    let engine = ScriptedEngine::new(InvocationOutcome::completed(0, "", ""));
    let runtime = runtime(&engine);

    assert_eq!(runtime.execute("sage_plot", json!({})).await, "Unknown tool: sage_plot");

    let text = runtime.execute("sage_eval", json!({"timeout_seconds": 5})).await;
    assert!(text.starts_with("Invalid arguments for sage_eval:"));
    assert!(engine.requests().is_empty());
}

#[test]
fn test_server_and_runtime_agree_on_tools() {
    let runtime = ToolRuntime::with_command("sage");
    let server = SageMathServer::new(runtime.clone());
    let advertised: Vec<String> = server.tools().iter().map(|t| t.name.to_string()).collect();

    for name in TOOL_NAMES {
        assert!(runtime.has_tool(name));
        assert!(advertised.iter().any(|n| n == name), "{} not advertised", name);
    }
}

#[quickcheck]
fn prop_successful_eval_text_is_formatted_outcome(stdout: String, stderr: String) -> bool {
    let outcome = InvocationOutcome::completed(0, &stdout, &stderr);
    let expected = format_outcome(&outcome);
    let engine = ScriptedEngine::new(outcome);

    let text = tokio_test::block_on(
        runtime(&engine).execute("sage_eval", json!({"expression": "x"})),
    );
    text == expected
}
