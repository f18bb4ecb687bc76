use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cargo_audit_xlsx::cli::Args;
use cargo_audit_xlsx::error::{ExitCode, Result};
use cargo_audit_xlsx::transform::parse_report;
use cargo_audit_xlsx::workbook::write_workbook;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    let args = Args::parse_args();

    let parsed = parse_report(&args.report)?;
    info!(
        "Writing {} vulnerability rows to {}",
        parsed.rows.len(),
        args.output.display()
    );

    write_workbook(
        &parsed.rows,
        parsed.component_count,
        &args.output,
        !args.no_descriptors,
    )?;

    Ok(())
}
