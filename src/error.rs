use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the workbook was written
    Success = 0,
    /// Application error (report decode error, workbook I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for report-to-workbook conversion.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to read audit report: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    ReportReadError { path: PathBuf, details: String },

    #[error("Failed to parse audit report: {path}\nDetails: {details}\n\n💡 Hint: The report must be the JSON output of `cargo audit --json`")]
    ReportParseError { path: PathBuf, details: String },

    #[error("Failed to open existing workbook: {path}\nDetails: {details}\n\n💡 Hint: The destination file exists but is not a readable .xlsx workbook")]
    WorkbookOpenError { path: PathBuf, details: String },

    #[error("Failed to save workbook: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    WorkbookSaveError { path: PathBuf, details: String },

    #[error("Failed to create sheet \"{name}\": {details}")]
    SheetError { name: String, details: String },
}

/// Type alias for Result with anyhow::Error as the error type.
/// This provides a consistent error handling pattern across the codebase.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
