use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pdfform::PageSize;

/// Inspect, fill, and flatten PDF AcroForms.
#[derive(Debug, Parser)]
#[command(name = "pdfform", about, version)]
pub struct Cli {
    /// Print diagnostics to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the form fields of a PDF
    Fields {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// List widget annotations page by page instead of the field tree
        #[arg(long)]
        widgets: bool,
    },

    /// List checkbox names and the states each accepts
    Checkboxes {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fill form fields from a JSON object of field name to value
    Fill {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON object mapping field names to a string or null
        #[arg(long, value_name = "DATA")]
        data: PathBuf,

        /// Where to write the filled PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Mark every filled field read-only
        #[arg(long)]
        read_only: bool,

        /// Delete widgets mapped to the removal marker instead of hiding them
        #[arg(long)]
        delete_removed: bool,

        /// JSON file with fill settings
        #[arg(long, value_name = "SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Draw text at page coordinates from a JSON array of entries
    Overlay {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON array of {"x", "y", "page", "text"} entries
        #[arg(long, value_name = "DATA")]
        data: PathBuf,

        /// Where to write the resulting PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Canvas size: letter, legal, a4, or WIDTHxHEIGHT in points
        #[arg(long, value_parser = parse_page_size, default_value = "letter")]
        page_size: PageSize,

        /// JSON file with fill settings
        #[arg(long, value_name = "SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Replace text fields with drawn text at their positions
    Flatten {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON object mapping field names to a string or null
        #[arg(long, value_name = "DATA")]
        data: PathBuf,

        /// Where to write the resulting PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Canvas size: letter, legal, a4, or WIDTHxHEIGHT in points
        #[arg(long, value_parser = parse_page_size, default_value = "letter")]
        page_size: PageSize,

        /// JSON file with fill settings
        #[arg(long, value_name = "SETTINGS")]
        settings: Option<PathBuf>,
    },
}

/// Output format for listing subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
}

fn parse_page_size(input: &str) -> Result<PageSize, String> {
    PageSize::parse(input).ok_or_else(|| {
        format!("invalid page size '{input}': expected letter, legal, a4, or WIDTHxHEIGHT")
    })
}
