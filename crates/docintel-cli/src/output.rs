//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docintel_domain::ClauseRecord;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};

/// Clause tables wrap to this many columns
const TABLE_WIDTH: usize = 110;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a summary.
    pub fn format_summary(&self, document: &str, summary: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "document": document,
                "summary": summary,
            }))?),
            OutputFormat::Text => Ok(format!(
                "{}\n\n{}",
                self.colorize(&format!("Summary of {}", document), "cyan"),
                summary
            )),
            OutputFormat::Quiet => Ok(summary.to_string()),
        }
    }

    /// Format an answer to a question.
    pub fn format_answer(&self, question: &str, answer: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "question": question,
                "answer": answer,
            }))?),
            OutputFormat::Text | OutputFormat::Quiet => Ok(answer.to_string()),
        }
    }

    /// Format clause records.
    pub fn format_clauses(&self, clauses: &[ClauseRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_clauses_json(clauses),
            OutputFormat::Text => self.format_clauses_table(clauses),
            OutputFormat::Quiet => self.format_clauses_quiet(clauses),
        }
    }

    /// Format clauses as JSON.
    fn format_clauses_json(&self, clauses: &[ClauseRecord]) -> Result<String> {
        let json_clauses: Vec<serde_json::Value> = clauses
            .iter()
            .map(|c| serde_json::json!({ "title": c.title, "text": c.text }))
            .collect();

        Ok(serde_json::to_string_pretty(&json_clauses)?)
    }

    /// Format clauses as a table.
    fn format_clauses_table(&self, clauses: &[ClauseRecord]) -> Result<String> {
        if clauses.is_empty() {
            return Ok(self.colorize("No clauses found.", "yellow"));
        }
        if let [only] = clauses {
            if only.is_parsing_error() {
                return Ok(self.warning(&format!("{}: {}", only.title, only.text)));
            }
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Title", "Text"]);

        for (i, clause) in clauses.iter().enumerate() {
            let number = (i + 1).to_string();
            builder.push_record([number.as_str(), clause.title.as_str(), clause.text.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Width::wrap(TABLE_WIDTH));

        Ok(table.to_string())
    }

    /// Format clauses in quiet mode (one `title: text` per line).
    fn format_clauses_quiet(&self, clauses: &[ClauseRecord]) -> Result<String> {
        let lines: Vec<String> = clauses
            .iter()
            .map(|c| format!("{}: {}", c.title, c.text))
            .collect();
        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses() -> Vec<ClauseRecord> {
        vec![
            ClauseRecord::new("Term", "The lease runs for twelve months."),
            ClauseRecord::new("Deposit", "Two months of rent, refundable."),
        ]
    }

    #[test]
    fn test_json_clauses() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_clauses(&clauses()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[1]["title"], "Deposit");
    }

    #[test]
    fn test_table_clauses() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_clauses(&clauses()).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("Deposit"));
    }

    #[test]
    fn test_quiet_clauses() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_clauses(&clauses()).unwrap();
        assert_eq!(output.lines().next(), Some("Term: The lease runs for twelve months."));
    }

    #[test]
    fn test_empty_clauses() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_clauses(&[]).unwrap();
        assert!(output.contains("No clauses found"));
    }

    #[test]
    fn test_parsing_error_shown_as_warning() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter
            .format_clauses(&[ClauseRecord::parsing_error("bad output")])
            .unwrap();
        assert_eq!(output, "⚠ Parsing Error: bad output");
    }

    #[test]
    fn test_summary_formats() {
        let json = Formatter::new(OutputFormat::Json, false)
            .format_summary("lease.pdf", "Short.")
            .unwrap();
        assert!(json.contains("\"summary\": \"Short.\""));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_summary("lease.pdf", "Short.")
            .unwrap();
        assert_eq!(quiet, "Short.");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
