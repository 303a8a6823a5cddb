//! SageMath tool surface
//!
//! Provides the seven tools exposed to MCP clients:
//! - sage_version, sage_eval, sage_solve, sage_run
//! - fusion_ring_api_catalog (static, never runs the engine)
//! - fusion_ring_eval, fusion_ring_fusion_rules

pub mod types;
pub mod catalog;
pub mod snippets;
pub mod runtime;

// Re-export commonly used types
pub use types::{
    CatalogRequest, FusionRingEvalRequest, FusionRingSpec, FusionRulesRequest, SageEvalRequest,
    SageRunRequest, SageSolveRequest, SageVersionRequest,
};
pub use catalog::{catalog, CatalogScope};
pub use runtime::{ToolRuntime, TOOL_NAMES};
