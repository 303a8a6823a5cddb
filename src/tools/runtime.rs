//! Tool runtime
//!
//! The seven tool operations. Each one normalizes its parameters, builds
//! a snippet, hands it to the [`EngineRunner`] and formats the outcome.
//! Every path returns text; nothing here fails.

use crate::engine::{format_outcome, format_version, EngineRunner, InvocationRequest, ProcessRunner};
use crate::tools::catalog;
use crate::tools::snippets;
use crate::tools::types::{
    deadline, CatalogRequest, FusionRingEvalRequest, FusionRingSpec, FusionRulesRequest,
    SageEvalRequest, SageRunRequest, SageSolveRequest, SageVersionRequest,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Tool names in declaration order
pub const TOOL_NAMES: [&str; 7] = [
    "sage_version",
    "sage_eval",
    "sage_solve",
    "sage_run",
    "fusion_ring_api_catalog",
    "fusion_ring_eval",
    "fusion_ring_fusion_rules",
];

/// Tool runtime coordinator
#[derive(Clone)]
pub struct ToolRuntime {
    runner: Arc<dyn EngineRunner>,
}

impl ToolRuntime {
    /// Create runtime over any runner
    pub fn new(runner: Arc<dyn EngineRunner>) -> Self {
        Self { runner }
    }

    /// Create runtime spawning the given engine executable
    pub fn with_command(command: impl Into<String>) -> Self {
        Self::new(Arc::new(ProcessRunner::new(command)))
    }

    /// Engine executable used by the runner
    pub fn command(&self) -> &str {
        self.runner.command()
    }

    /// Check if tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        TOOL_NAMES.contains(&name)
    }

    async fn run_snippet(&self, tool: &str, snippet: String, timeout_seconds: u64) -> String {
        let timeout = deadline(timeout_seconds);
        tracing::debug!(tool, timeout_secs = timeout.as_secs(), "dispatching snippet");
        let outcome = self.runner.run(InvocationRequest::code(snippet, timeout)).await;
        tracing::debug!(tool, exit_code = outcome.exit_code(), "tool finished");
        format_outcome(&outcome)
    }

    /// Return SageMath version
    pub async fn sage_version(&self, req: SageVersionRequest) -> String {
        let timeout = deadline(req.timeout_seconds);
        tracing::debug!(tool = "sage_version", timeout_secs = timeout.as_secs(), "querying version");
        let outcome = self.runner.run(InvocationRequest::version(timeout)).await;
        format_version(&outcome, self.runner.command(), timeout)
    }

    /// Evaluate one SageMath expression and return its printed result
    pub async fn sage_eval(&self, req: SageEvalRequest) -> String {
        let snippet = snippets::eval_snippet(&req.expression);
        self.run_snippet("sage_eval", snippet, req.timeout_seconds).await
    }

    /// Solve one equation in SageMath
    pub async fn sage_solve(&self, req: SageSolveRequest) -> String {
        let variable = match req.variable.trim() {
            "" => "x",
            v => v,
        };
        let snippet = snippets::solve_snippet(&req.equation, variable);
        self.run_snippet("sage_solve", snippet, req.timeout_seconds).await
    }

    /// Run raw SageMath code; the code is executed as given
    pub async fn sage_run(&self, req: SageRunRequest) -> String {
        self.run_snippet("sage_run", req.code, req.timeout_seconds).await
    }

    /// Curated API catalog for fusion rings
    pub fn fusion_ring_api_catalog(&self, req: CatalogRequest) -> String {
        catalog::catalog(&req.scope)
    }

    /// Evaluate an expression on FusionRing(ct, k) with prepared locals
    pub async fn fusion_ring_eval(&self, req: FusionRingEvalRequest) -> String {
        let ring = FusionRingSpec::from(&req);
        let snippet = snippets::fusion_ring_eval_snippet(&ring, &req.expression);
        self.run_snippet("fusion_ring_eval", snippet, req.timeout_seconds).await
    }

    /// Full fusion rules N^k_{ij} for FusionRing(ct, k)
    pub async fn fusion_ring_fusion_rules(&self, req: FusionRulesRequest) -> String {
        let ring = FusionRingSpec::from(&req);
        let snippet = snippets::fusion_rules_snippet(&ring);
        self.run_snippet("fusion_ring_fusion_rules", snippet, req.timeout_seconds).await
    }

    /// Execute a tool by name with JSON arguments
    ///
    /// Unknown tools and malformed arguments come back as text, like every
    /// other failure.
    pub async fn execute(&self, tool: &str, args: serde_json::Value) -> String {
        match tool {
            "sage_version" => match parse_args(tool, args) {
                Ok(req) => self.sage_version(req).await,
                Err(msg) => msg,
            },
            "sage_eval" => match parse_args(tool, args) {
                Ok(req) => self.sage_eval(req).await,
                Err(msg) => msg,
            },
            "sage_solve" => match parse_args(tool, args) {
                Ok(req) => self.sage_solve(req).await,
                Err(msg) => msg,
            },
            "sage_run" => match parse_args(tool, args) {
                Ok(req) => self.sage_run(req).await,
                Err(msg) => msg,
            },
            "fusion_ring_api_catalog" => match parse_args(tool, args) {
                Ok(req) => self.fusion_ring_api_catalog(req),
                Err(msg) => msg,
            },
            "fusion_ring_eval" => match parse_args(tool, args) {
                Ok(req) => self.fusion_ring_eval(req).await,
                Err(msg) => msg,
            },
            "fusion_ring_fusion_rules" => match parse_args(tool, args) {
                Ok(req) => self.fusion_ring_fusion_rules(req).await,
                Err(msg) => msg,
            },
            _ => format!("Unknown tool: {}", tool),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: serde_json::Value) -> Result<T, String> {
    let args = if args.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments for {}: {}", tool, e))
}
