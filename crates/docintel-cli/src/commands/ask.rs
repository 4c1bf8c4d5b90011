//! Ask command implementation.

use super::{open_document, Pipeline};
use crate::cli::AskArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the ask command.
///
/// A one-shot question carries no history.
pub async fn execute_ask(args: AskArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let question = args.question();
    let document = open_document(&args.file)?;
    let answer = pipeline.query(&document, &question, &[]).await?;

    println!("{}", formatter.format_answer(&question, &answer)?);

    Ok(())
}
