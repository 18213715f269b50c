//! Line-oriented operator console.
//!
//! Input arrives as [`ReadEvent`]s from a [`LineSource`]: a line, the end of
//! input, or an interrupt. Tests drive the console with a [`LineReader`] over
//! an in-memory script; the binary uses [`StdinSource`], which reads stdin on
//! a feeder thread and turns Ctrl-C into an `Interrupted` event.

use std::io::{self, BufRead, Cursor, Write};
use std::sync::mpsc::{self, Receiver};

use thiserror::Error;

/// One result of waiting for operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// A line, without its trailing newline.
    Line(String),
    /// End of input, or a read failure.
    Eof,
    /// Ctrl-C while waiting.
    Interrupted,
}

/// Errors surfaced by console reads inside a branch.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("input ended while waiting for an answer to {prompt:?}")]
    EndOfInput { prompt: String },

    #[error("interrupted while waiting for an answer to {prompt:?}")]
    Interrupted { prompt: String },

    #[error("console write failed: {0}")]
    Io(#[from] io::Error),
}

pub trait LineSource {
    /// Block until the operator produces the next event.
    fn next_event(&mut self) -> ReadEvent;
}

/// Reads lines from any buffered reader. Read failures count as end of input.
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineReader<Cursor<String>> {
    /// Operator input scripted as newline-separated answers.
    pub fn script(input: impl Into<String>) -> Self {
        Self::new(Cursor::new(input.into()))
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_event(&mut self) -> ReadEvent {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => ReadEvent::Eof,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                ReadEvent::Line(line)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Console read failed, treating as end of input");
                ReadEvent::Eof
            }
        }
    }
}

/// Stdin fed through a channel so Ctrl-C can wake a blocked read.
pub struct StdinSource {
    events: Receiver<ReadEvent>,
    finished: bool,
}

impl StdinSource {
    /// Start the stdin feeder thread and install the Ctrl-C handler.
    pub fn spawn() -> anyhow::Result<Self> {
        let (tx, events) = mpsc::channel();

        let interrupt_tx = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupt_tx.send(ReadEvent::Interrupted);
        })?;

        std::thread::Builder::new()
            .name("stdin-feeder".into())
            .spawn(move || {
                let mut reader = LineReader::new(io::stdin().lock());
                loop {
                    let event = reader.next_event();
                    let done = event == ReadEvent::Eof;
                    if tx.send(event).is_err() || done {
                        break;
                    }
                }
            })?;

        Ok(Self {
            events,
            finished: false,
        })
    }
}

impl LineSource for StdinSource {
    fn next_event(&mut self) -> ReadEvent {
        // The Ctrl-C handler keeps a sender alive after the feeder exits.
        if self.finished {
            return ReadEvent::Eof;
        }
        let event = self.events.recv().unwrap_or(ReadEvent::Eof);
        if event == ReadEvent::Eof {
            self.finished = true;
        }
        event
    }
}

/// Prompt, read and print against one operator.
pub struct Console<W: Write> {
    source: Box<dyn LineSource>,
    out: W,
}

impl Console<io::Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio() -> anyhow::Result<Self> {
        Ok(Self::new(Box::new(StdinSource::spawn()?), io::stdout()))
    }
}

impl<W: Write> Console<W> {
    pub fn new(source: Box<dyn LineSource>, out: W) -> Self {
        Self { source, out }
    }

    /// Console reading a fixed script of answers.
    pub fn scripted(input: impl Into<String>, out: W) -> Self {
        Self::new(Box::new(LineReader::script(input)), out)
    }

    /// Print a line.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Print without a trailing newline, leaving the cursor after `text`.
    pub fn show(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Prompt for an answer inside a branch. Returns the trimmed line.
    ///
    /// End of input and interrupts are errors here; only the top-level
    /// command prompt treats them as a normal way to leave.
    pub fn ask(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.show(prompt)?;
        match self.source.next_event() {
            ReadEvent::Line(line) => Ok(line.trim().to_string()),
            ReadEvent::Eof => Err(ConsoleError::EndOfInput {
                prompt: prompt.trim().to_string(),
            }),
            ReadEvent::Interrupted => Err(ConsoleError::Interrupted {
                prompt: prompt.trim().to_string(),
            }),
        }
    }

    /// Prompt for a top-level command. `None` means the operator left.
    pub fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.show(prompt)?;
        match self.source.next_event() {
            ReadEvent::Line(line) => Ok(Some(line.trim().to_string())),
            ReadEvent::Eof => Ok(None),
            ReadEvent::Interrupted => {
                tracing::debug!("Interrupted at command prompt");
                Ok(None)
            }
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Events(Vec<ReadEvent>);

    impl LineSource for Events {
        fn next_event(&mut self) -> ReadEvent {
            if self.0.is_empty() {
                ReadEvent::Eof
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn test_line_reader_strips_line_endings() {
        let mut reader = LineReader::script("first\r\nsecond\nlast");
        assert_eq!(reader.next_event(), ReadEvent::Line("first".into()));
        assert_eq!(reader.next_event(), ReadEvent::Line("second".into()));
        assert_eq!(reader.next_event(), ReadEvent::Line("last".into()));
        assert_eq!(reader.next_event(), ReadEvent::Eof);
    }

    #[test]
    fn test_ask_trims_and_echoes_prompt() {
        let mut console = Console::scripted("  Curiosity  \n", Vec::new());
        let answer = console.ask("why? $ ").unwrap();
        assert_eq!(answer, "Curiosity");
        assert_eq!(String::from_utf8_lossy(console.writer()), "why? $ ");
    }

    #[test]
    fn test_ask_fails_on_end_of_input() {
        let mut console = Console::scripted("", Vec::new());
        let err = console.ask("Your answer: $ ").unwrap_err();
        assert!(matches!(err, ConsoleError::EndOfInput { .. }));
    }

    #[test]
    fn test_ask_fails_on_interrupt() {
        let mut console = Console::new(Box::new(Events(vec![ReadEvent::Interrupted])), Vec::new());
        let err = console.ask("Your answer: $ ").unwrap_err();
        assert!(matches!(err, ConsoleError::Interrupted { .. }));
    }

    #[test]
    fn test_read_command_ends_on_interrupt_or_eof() {
        let mut console = Console::new(
            Box::new(Events(vec![
                ReadEvent::Line(" HELP ".into()),
                ReadEvent::Interrupted,
            ])),
            Vec::new(),
        );
        assert_eq!(console.read_command("$ ").unwrap(), Some("HELP".into()));
        assert_eq!(console.read_command("$ ").unwrap(), None);
        assert_eq!(console.read_command("$ ").unwrap(), None);
    }
}
