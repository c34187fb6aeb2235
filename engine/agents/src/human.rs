//! Interactive player reading columns from a text stream.

use std::fmt;
use std::io::{self, BufRead, BufReader, Write};

use games_connect4::{Board, InvalidMove, Move, COLS};
use tracing::debug;

use crate::error::AgentError;

/// Words that end the game for this player instead of naming a column.
const RESIGN_WORDS: [&str; 3] = ["q", "quit", "resign"];

/// A person choosing columns at a prompt.
///
/// Only the column is asked for; the piece lands on the lowest open cell. A
/// full column is still returned (aimed at its occupied top cell) so the
/// caller's validation rejects it and calls
/// [`handle_invalid_move`](HumanAgent::handle_invalid_move).
pub struct HumanAgent {
    name: String,
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl HumanAgent {
    /// Prompt on stdout, read from stdin.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::with_io(name, BufReader::new(io::stdin()), io::stdout())
    }

    pub fn with_io(
        name: impl Into<String>,
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prompt until a column number in range is entered.
    pub fn get_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        loop {
            write!(self.output, "{}, enter a column (0-{}): ", self.name, COLS - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
            }
            let line = line.trim();

            if RESIGN_WORDS.contains(&line.to_ascii_lowercase().as_str()) {
                return Err(AgentError::Forfeit);
            }

            match parse_column(line) {
                Some(top) => {
                    let mv = board.drop_target(top.col()).unwrap_or(top);
                    debug!(player = %self.name, %mv, "Human move entered");
                    return Ok(mv);
                }
                None => writeln!(
                    self.output,
                    "'{}' is not a column, enter a number from 0 to {}",
                    line,
                    COLS - 1
                )?,
            }
        }
    }

    pub fn handle_invalid_move(&mut self, reason: &InvalidMove) -> Result<(), AgentError> {
        writeln!(self.output)?;
        writeln!(self.output, "Invalid move! Try again. ({reason})")?;
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(())
    }
}

impl fmt::Debug for HumanAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumanAgent")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Top cell of the named column, or `None` if the text is not a column.
fn parse_column(text: &str) -> Option<Move> {
    text.parse::<usize>().ok().and_then(|col| Move::at(0, col))
}
