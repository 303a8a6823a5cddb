//! Command-line argument parsing for sagemath-mcp
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sagemath-mcp - SageMath computations as MCP tools
#[derive(Parser, Debug)]
#[command(name = "sagemath-mcp")]
#[command(version)]
#[command(about = "Expose SageMath computations as MCP tools over stdio", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sage executable (overrides SAGE_CMD and the config file)
    #[arg(long, global = true, value_name = "CMD")]
    pub sage_cmd: Option<String>,

    /// Verbosity level: -q (quiet), default (normal), -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// Check configuration and Sage availability
    Check,

    /// Print the fusion ring API catalog
    Catalog {
        /// all, fusion_ring, fusion_double or f_matrix
        #[arg(default_value = "all")]
        scope: String,
    },

    /// List the tools and their parameters
    Tools,

    /// Call one tool directly and print its result
    Call {
        /// Tool name, e.g. sage_eval
        tool: String,

        /// JSON object with the tool arguments
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Display the effective configuration
    Config {
        /// Write a default config file to the config path
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run; no subcommand means serve
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

impl Verbosity {
    /// Log filter for this verbosity, given the configured default
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => configured,
            Verbosity::Verbose => "debug",
            Verbosity::VeryVerbose => "trace",
        }
    }
}
