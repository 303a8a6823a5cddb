//! Tool parameter types
//!
//! One request struct per tool. The same structs drive argument
//! deserialization and the JSON schemas advertised to MCP clients, so the
//! documented defaults and the applied defaults cannot drift apart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const VERSION_TIMEOUT_SECS: u64 = 10;
pub const EVAL_TIMEOUT_SECS: u64 = 20;
pub const SOLVE_TIMEOUT_SECS: u64 = 20;
pub const RUN_TIMEOUT_SECS: u64 = 30;
pub const FUSION_EVAL_TIMEOUT_SECS: u64 = 45;
pub const FUSION_RULES_TIMEOUT_SECS: u64 = 90;

fn default_version_timeout() -> u64 {
    VERSION_TIMEOUT_SECS
}

fn default_eval_timeout() -> u64 {
    EVAL_TIMEOUT_SECS
}

fn default_solve_timeout() -> u64 {
    SOLVE_TIMEOUT_SECS
}

fn default_run_timeout() -> u64 {
    RUN_TIMEOUT_SECS
}

fn default_fusion_eval_timeout() -> u64 {
    FUSION_EVAL_TIMEOUT_SECS
}

fn default_fusion_rules_timeout() -> u64 {
    FUSION_RULES_TIMEOUT_SECS
}

fn default_variable() -> String {
    "x".to_string()
}

fn default_scope() -> String {
    "all".to_string()
}

/// Convert a caller timeout to a deadline; zero is raised to one second
pub fn deadline(timeout_seconds: u64) -> Duration {
    Duration::from_secs(timeout_seconds.max(1))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SageVersionRequest {
    /// Max runtime in seconds.
    #[serde(default = "default_version_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SageVersionRequest {
    fn default() -> Self {
        Self {
            timeout_seconds: VERSION_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SageEvalRequest {
    /// Sage expression, e.g. "factor(x^4 - 1)".
    pub expression: String,

    /// Max runtime in seconds.
    #[serde(default = "default_eval_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SageSolveRequest {
    /// Equation text, e.g. "x^2 - 5*x + 6 == 0".
    pub equation: String,

    /// Variable name, e.g. "x".
    #[serde(default = "default_variable")]
    pub variable: String,

    /// Max runtime in seconds.
    #[serde(default = "default_solve_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SageRunRequest {
    /// Raw Sage code. Use print(...) to emit outputs.
    pub code: String,

    /// Max runtime in seconds.
    #[serde(default = "default_run_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogRequest {
    /// One of "all", "fusion_ring", "fusion_double", "f_matrix".
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for CatalogRequest {
    fn default() -> Self {
        Self {
            scope: default_scope(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FusionRingEvalRequest {
    /// Cartan type, e.g. "A2", "G2", "['A',2]".
    pub ct: String,

    /// Fusion level.
    pub k: i64,

    /// Sage expression using FR/R, e.g. "FR.s_matrix(unitary=True)".
    pub expression: String,

    /// Build the conjugate ring.
    #[serde(default)]
    pub conjugate: bool,

    /// Optional cyclotomic order override.
    #[serde(default)]
    pub cyclotomic_order: Option<i64>,

    /// Optional labels setup.
    #[serde(default)]
    pub fusion_labels: Option<String>,

    /// Passed to FusionRing constructor.
    #[serde(default)]
    pub inject_variables: bool,

    /// Max runtime in seconds.
    #[serde(default = "default_fusion_eval_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FusionRulesRequest {
    /// Cartan type, e.g. "A2", "G2", "['A',2]".
    pub ct: String,

    /// Fusion level.
    pub k: i64,

    /// Build the conjugate ring.
    #[serde(default)]
    pub conjugate: bool,

    /// Optional cyclotomic order override.
    #[serde(default)]
    pub cyclotomic_order: Option<i64>,

    /// Optional labels setup.
    #[serde(default)]
    pub fusion_labels: Option<String>,

    /// Passed to FusionRing constructor.
    #[serde(default)]
    pub inject_variables: bool,

    /// Max runtime in seconds.
    #[serde(default = "default_fusion_rules_timeout")]
    pub timeout_seconds: u64,
}

/// Construction parameters of a `FusionRing`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionRingSpec {
    pub ct: String,
    pub k: i64,
    pub conjugate: bool,
    pub cyclotomic_order: Option<i64>,
    pub fusion_labels: Option<String>,
    pub inject_variables: bool,
}

impl FusionRingSpec {
    /// Ring of the given Cartan type and level with default options
    pub fn new(ct: impl Into<String>, k: i64) -> Self {
        Self {
            ct: ct.into(),
            k,
            conjugate: false,
            cyclotomic_order: None,
            fusion_labels: None,
            inject_variables: false,
        }
    }
}

impl From<&FusionRingEvalRequest> for FusionRingSpec {
    fn from(req: &FusionRingEvalRequest) -> Self {
        Self {
            ct: req.ct.clone(),
            k: req.k,
            conjugate: req.conjugate,
            cyclotomic_order: req.cyclotomic_order,
            fusion_labels: req.fusion_labels.clone(),
            inject_variables: req.inject_variables,
        }
    }
}

impl From<&FusionRulesRequest> for FusionRingSpec {
    fn from(req: &FusionRulesRequest) -> Self {
        Self {
            ct: req.ct.clone(),
            k: req.k,
            conjugate: req.conjugate,
            cyclotomic_order: req.cyclotomic_order,
            fusion_labels: req.fusion_labels.clone(),
            inject_variables: req.inject_variables,
        }
    }
}
