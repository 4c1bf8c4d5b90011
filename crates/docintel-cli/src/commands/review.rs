//! Review command implementation.

use super::{open_document, Pipeline};
use crate::cli::DocumentArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the review command.
pub async fn execute_review(
    args: DocumentArgs,
    pipeline: &Pipeline,
    formatter: &Formatter,
) -> Result<()> {
    let document = open_document(&args.file)?;
    let clauses = pipeline.review(&document).await?;

    println!("{}", formatter.format_clauses(&clauses)?);

    Ok(())
}
