//! Command-line interface definition for Complichat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot queries, and
//! document ingestion.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Complichat - compliance-analysis chat client
///
/// Exchange natural-language queries and PDF documents with a
/// compliance-analysis backend from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "complichat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the backend base URL from config
    #[arg(long, env = "COMPLICHAT_SERVER")]
    pub server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Complichat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Submit a single query and print the reply
    Query {
        /// The query text
        text: String,
    },

    /// Upload a PDF document for analysis
    Ingest {
        /// Path to the PDF file
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
