use clap::Parser;
use std::path::PathBuf;

/// Convert a cargo-audit JSON report into a styled Excel workbook
#[derive(Parser, Debug)]
#[command(name = "cargo-audit-xlsx")]
#[command(version)]
#[command(about = "Convert a cargo-audit JSON report into a styled Excel workbook", long_about = None)]
pub struct Args {
    /// Path to the `cargo audit --json` report
    pub report: PathBuf,

    /// Destination workbook path (created if absent, merged into if present)
    #[arg(short, long, default_value = "cargo_audit.xlsx")]
    pub output: PathBuf,

    /// Skip writing the column-descriptors glossary sheet
    #[arg(long)]
    pub no_descriptors: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
