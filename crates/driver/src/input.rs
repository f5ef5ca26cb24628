//! Text command input
//!
//! One command per line: a command name (`moveLeft`, `rotate`, `hardDrop`,
//! ...), `new` for a new game, or `quit`. Blank lines and `#` comments are
//! skipped.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::session::Input;
use crate::types::Command;

/// Outcome of parsing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Input(Input),
    Skip,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ParsedLine {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        return ParsedLine::Skip;
    }
    match word.to_ascii_lowercase().as_str() {
        "new" | "newgame" | "restart" => ParsedLine::Input(Input::NewGame),
        "quit" | "exit" | "q" => ParsedLine::Input(Input::Quit),
        _ => match Command::from_str(word) {
            Some(command) => ParsedLine::Input(Input::Command(command)),
            None => ParsedLine::Unknown(word.to_string()),
        },
    }
}

/// Forward parsed lines from `reader` into `tx` until EOF, `quit`, or the
/// session drops its receiver. Returns the number of inputs forwarded.
pub async fn read_inputs<R>(reader: R, tx: mpsc::Sender<Input>) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0u64;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ParsedLine::Input(input) => {
                let quit = input == Input::Quit;
                if tx.send(input).await.is_err() {
                    break;
                }
                forwarded += 1;
                if quit {
                    break;
                }
            }
            ParsedLine::Skip => {}
            ParsedLine::Unknown(word) => {
                eprintln!("[Input] Unknown command: {}", word);
            }
        }
    }
    Ok(forwarded)
}
