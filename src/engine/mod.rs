//! Engine execution bridge
//!
//! Keeps snippet generation and process execution apart:
//! - `literal` / `snippet`: pure code templating
//! - `runner`: subprocess execution under a deadline
//! - `format`: pure outcome formatting

pub mod literal;
pub mod snippet;
pub mod runner;
pub mod format;

pub use literal::PyValue;
pub use snippet::SnippetBuilder;
pub use runner::{
    EngineRunner, ExitKind, Invocation, InvocationOutcome, InvocationRequest, ProcessRunner,
    NOT_FOUND_EXIT_CODE, TIMEOUT_EXIT_CODE, TIMEOUT_MARKER,
};
pub use format::{format_outcome, format_version};
