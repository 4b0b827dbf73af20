//! Command-line argument parsing for the CLI host
//!
//! Supports:
//! - Resolving at a byte offset or a 1-based line/column
//! - Text or JSON row output
//! - Watch mode that re-resolves on every save

use clap::Parser;
use std::path::PathBuf;

/// Show the RSpec context (lets, subjects, before hooks, groups) at a position
#[derive(Parser, Debug)]
#[command(name = "rspec-context", version, about = "Show the RSpec scope at a cursor position")]
pub struct CliArgs {
    /// Spec file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Byte offset of the cursor
    #[arg(long, value_name = "N", conflicts_with_all = ["line", "column"])]
    pub offset: Option<usize>,

    /// Cursor line N (1-based)
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Cursor column N (1-based, used with --line)
    #[arg(long, value_name = "N", requires = "line")]
    pub column: Option<usize>,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep running and re-resolve whenever the file changes
    #[arg(short = 'w', long)]
    pub watch: bool,
}

/// Where the cursor starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPosition {
    Offset(usize),
    /// 0-indexed line and column (in chars)
    LineColumn(usize, usize),
}

/// Output format for rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub file: PathBuf,
    pub position: CursorPosition,
    pub format: OutputFormat,
    pub watch: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if self.offset.is_some() && self.line.is_some() {
            return Err("--offset cannot be combined with --line".to_string());
        }
        if self.line == Some(0) || self.column == Some(0) {
            return Err("--line and --column are 1-based".to_string());
        }

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let position = match (self.offset, self.line) {
            (Some(offset), _) => CursorPosition::Offset(offset),
            (None, Some(line)) => {
                CursorPosition::LineColumn(line - 1, self.column.unwrap_or(1) - 1)
            }
            (None, None) => CursorPosition::Offset(0),
        };

        Ok(StartupConfig {
            file: self.file,
            position,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            watch: self.watch,
        })
    }
}
