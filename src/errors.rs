//! Error types for sagemath-mcp
//!
//! Tool invocations never fail: every engine-side problem is folded into
//! the formatted text result. These errors cover process startup only
//! (configuration, logging, the MCP transport).

use thiserror::Error;

/// Main error type for the bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// MCP transport or handshake errors
    #[error("MCP server error: {0}")]
    ServerError(String),

    /// Logging subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    LoggingError(String),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
