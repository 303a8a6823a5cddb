//! sagemath-mcp - SageMath execution bridge
//!
//! Exposes SageMath computations as MCP tools over stdio. Every tool call
//! spawns one short-lived Sage process with a generated Python snippet,
//! bounded by a timeout, and returns its normalized output as text.
//!
//! # Architecture
//!
//! - **engine**: literal escaping, snippet assembly, process execution, result formatting
//! - **tools**: parameter types, snippet templates, the static API catalog, tool runtime
//! - **server**: rmcp stdio adapter
//! - **cli** / **doctor** / **logging**: binary plumbing

pub mod errors;
pub mod engine;
pub mod tools;
pub mod server;

// Re-export commonly used types
pub use errors::{BridgeError, Result};

pub mod cli;
pub mod doctor;
pub mod logging;
