//! MCP stdio server
//!
//! Thin rmcp adapter over [`ToolRuntime`]. Every tool answers with a
//! single text content; engine failures are part of that text, so the
//! protocol-level call always succeeds.

use crate::errors::{self, BridgeError};
use crate::tools::{
    CatalogRequest, FusionRingEvalRequest, FusionRulesRequest, SageEvalRequest, SageRunRequest,
    SageSolveRequest, SageVersionRequest, ToolRuntime,
};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo, Tool};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};

const INSTRUCTIONS: &str = "SageMath bridge. Use sage_eval for single expressions, sage_solve for \
equations, sage_run for multi-line code (print results explicitly), and the fusion_ring_* tools \
to explore FusionRing(ct, k). Every call runs a fresh Sage process under a timeout.";

fn text_result(text: String) -> std::result::Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// SageMath MCP service
#[derive(Clone)]
pub struct SageMathServer {
    runtime: ToolRuntime,
    tool_router: ToolRouter<Self>,
}

impl SageMathServer {
    pub fn new(runtime: ToolRuntime) -> Self {
        Self {
            runtime,
            tool_router: Self::tool_router(),
        }
    }

    /// Tool definitions advertised to clients
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

#[tool_router]
impl SageMathServer {
    #[tool(description = "Return SageMath version.")]
    async fn sage_version(
        &self,
        Parameters(request): Parameters<SageVersionRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.sage_version(request).await)
    }

    #[tool(description = "Evaluate one SageMath expression and return its printed result.")]
    async fn sage_eval(
        &self,
        Parameters(request): Parameters<SageEvalRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.sage_eval(request).await)
    }

    #[tool(description = "Solve one equation in SageMath.")]
    async fn sage_solve(
        &self,
        Parameters(request): Parameters<SageSolveRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.sage_solve(request).await)
    }

    #[tool(description = "Run raw SageMath code (multi-line allowed). Use print(...) to emit outputs.")]
    async fn sage_run(
        &self,
        Parameters(request): Parameters<SageRunRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.sage_run(request).await)
    }

    #[tool(description = "Return a curated API catalog for SageMath fusion rings.")]
    async fn fusion_ring_api_catalog(
        &self,
        Parameters(request): Parameters<CatalogRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.fusion_ring_api_catalog(request))
    }

    #[tool(description = "Evaluate an expression on FusionRing(ct, k) with prepared locals: \
FR and R (the ring), basis = FR.basis(), order = FR.get_order(), simples = simple objects in order.")]
    async fn fusion_ring_eval(
        &self,
        Parameters(request): Parameters<FusionRingEvalRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.fusion_ring_eval(request).await)
    }

    #[tool(description = "Return full fusion rules N^k_{ij} for FusionRing(ct, k).")]
    async fn fusion_ring_fusion_rules(
        &self,
        Parameters(request): Parameters<FusionRulesRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        text_result(self.runtime.fusion_ring_fusion_rules(request).await)
    }
}

#[tool_handler]
impl ServerHandler for SageMathServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

/// Serve the tools over stdin/stdout until the client disconnects
pub async fn serve_stdio(runtime: ToolRuntime) -> errors::Result<()> {
    tracing::info!(command = %runtime.command(), "serving MCP over stdio");
    let service = SageMathServer::new(runtime)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BridgeError::ServerError(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| BridgeError::ServerError(e.to_string()))?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}
