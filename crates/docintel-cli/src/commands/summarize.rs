//! Summarize command implementation.

use super::{display_name, open_document, Pipeline};
use crate::cli::DocumentArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the summarize command.
pub async fn execute_summarize(
    args: DocumentArgs,
    pipeline: &Pipeline,
    formatter: &Formatter,
) -> Result<()> {
    let document = open_document(&args.file)?;
    let summary = pipeline.summarize(&document).await?;

    println!(
        "{}",
        formatter.format_summary(&display_name(&document, &args.file), &summary)?
    );

    Ok(())
}
