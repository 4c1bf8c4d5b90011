//! Interactive chat REPL over a single document.
//!
//! The REPL owns the conversation: each answered question is appended to a
//! `ChatSession`, and the pipeline decides how much of it reaches the prompt.

use crate::commands::{display_name, open_document, Pipeline};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docintel_domain::{ChatSession, Role};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::{Path, PathBuf};

/// Run the chat REPL for the document at `path`.
pub async fn run_chat(
    path: &Path,
    pipeline: &Pipeline,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let document = open_document(path)?;
    let name = display_name(&document, path);
    let mut session = ChatSession::new(Some(name.clone()));

    println!(
        "{}",
        formatter.info(&format!(
            "Chatting with {} - Type '/help' for commands, '/exit' to quit",
            name
        ))
    );
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e))))?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("docintel> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    ReplCommand::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplCommand::Help => print_help(formatter),
                    ReplCommand::History => print_history(&session, formatter),
                    ReplCommand::Clear => {
                        session = ChatSession::new(Some(name.clone()));
                        println!("{}", formatter.success("Conversation cleared"));
                    }
                    ReplCommand::Unknown(cmd) => {
                        eprintln!(
                            "{}",
                            formatter.error(&format!(
                                "Unknown command: {}. Type '/help' for available commands.",
                                cmd
                            ))
                        );
                    }
                    ReplCommand::Ask(question) => {
                        match pipeline.chat(&document, &mut session, question).await {
                            Ok(answer) => {
                                println!("{}", formatter.format_answer(question, &answer)?);
                                println!();
                            }
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use '/exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL input kinds.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Exit,
    Help,
    History,
    Clear,
    Unknown(&'a str),
    Ask(&'a str),
}

/// Anything not starting with '/' is a question.
fn parse_repl_command(line: &str) -> ReplCommand<'_> {
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Ask(line);
    };

    match command.split_whitespace().next().unwrap_or("") {
        "exit" | "quit" | "q" => ReplCommand::Exit,
        "help" | "?" => ReplCommand::Help,
        "history" => ReplCommand::History,
        "clear" => ReplCommand::Clear,
        _ => ReplCommand::Unknown(line),
    }
}

fn print_history(session: &ChatSession, formatter: &Formatter) {
    if session.is_empty() {
        println!("{}", formatter.info("No questions asked yet"));
        return;
    }
    for turn in session.turns() {
        let speaker = match turn.role {
            Role::User => "You",
            Role::Assistant => "docintel",
        };
        println!("{}: {}", speaker, turn.text);
    }
    println!();
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let docintel_dir = home.join(".docintel");
    std::fs::create_dir_all(&docintel_dir)?;
    Ok(docintel_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Type a question to ask about the document."));
    println!();
    println!("  /history        - Show this conversation");
    println!("  /clear          - Start a new conversation");
    println!("  /help, /?       - Show this help");
    println!("  /exit, /quit    - Exit chat");
    println!();
}
