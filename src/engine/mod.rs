//! The command loop and the narrative branches.
//!
//! A [`Machine`] owns one operator session: the console, the progress flags,
//! the transcript sink, the asset loader and the reward RNG. The top-level
//! loop reads a command, normalizes it into a [`Command`] and dispatches it.
//! Each branch is a short prompt → read → decide sequence that appends its
//! own transcript records and returns a structured outcome.

mod command;
mod explore;
mod greeting;
mod memory;
mod repair;
mod restore;
mod reward;

pub use command::Command;
pub use explore::ExploreOutcome;
pub use greeting::Motivation;
pub use memory::MemoryOutcome;
pub use repair::RepairOutcome;
pub use restore::{EnigmaKind, RestoreOutcome, MAX_ATTEMPTS};
pub use reward::draw_asset;

use std::io::Write;

use anyhow::Result;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::assets::AssetLoader;
use crate::console::Console;
use crate::db::TranscriptSink;
use crate::models::{NewCommandRecord, Progress};

pub const PROMPT: &str = "operator: $ ";

pub const BANNER: &str = "\
****************************************
*      WELCOME TO THE MACHINE          *
****************************************
You stand before a machine that is more than mere circuitry.
Within its digital labyrinth lie secrets, memories, and enigmas waiting to be unraveled.
Each command may lead you down a different path – choose wisely.
";

pub const HELP: &str = "\
AVAILABLE COMMANDS:
  HELP                - Display this help message.
  RESTORE MEMORY      - Begin the complete memory restoration mission.
  REPAIR              - Begin the repair sequence. (Path of Restoration)
  MEMORY              - Enter the memory vault. (Path of Reminiscence)
  SAY HELLO           - Initiate a greeting dialogue. (Path of Greeting)
  GREET SYSTEM        - Receive a cryptic system greeting. (Also Path of Greeting)
  EXPLORE             - Venture into the digital labyrinth. (Path of Obfuscation)
  EXIT/QUIT           - Terminate the session.
";

pub const UNKNOWN_COMMAND: &str = "UNKNOWN COMMAND. Type 'HELP' for available commands.";

pub const FAREWELL: &str = "Terminating session. Goodbye, Operator. 再见。";

/// Transcript label for a session that ended at the prompt (Ctrl-D / Ctrl-C).
pub const SESSION_END: &str = "Session End";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Machine<W: Write> {
    console: Console<W>,
    sink: Box<dyn TranscriptSink>,
    assets: Box<dyn AssetLoader>,
    rng: StdRng,
    progress: Progress,
    session_id: Uuid,
}

impl<W: Write> Machine<W> {
    pub fn new(
        console: Console<W>,
        sink: Box<dyn TranscriptSink>,
        assets: Box<dyn AssetLoader>,
        rng: StdRng,
    ) -> Self {
        Self {
            console,
            sink,
            assets,
            rng,
            progress: Progress::new(),
            session_id: Uuid::new_v4(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    /// Run the session until the operator exits or input ends.
    ///
    /// End of input or Ctrl-C at the command prompt ends the session
    /// normally. The same inside a branch is returned as an error.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(session = %self.session_id, "Session started");
        self.console.say(BANNER)?;

        loop {
            let Some(line) = self.console.read_command(PROMPT)? else {
                let farewell = format!("\n{FAREWELL}");
                self.console.say(&farewell)?;
                self.record(SESSION_END, farewell)?;
                break;
            };

            if self.dispatch(&line)? == Flow::Exit {
                break;
            }
        }

        tracing::info!(session = %self.session_id, "Session ended");
        Ok(())
    }

    /// Handle one line typed at the command prompt.
    pub fn dispatch(&mut self, input: &str) -> Result<Flow> {
        let raw = input.trim();
        let Some(command) = Command::parse(raw) else {
            return Ok(Flow::Continue);
        };
        tracing::debug!(?command, raw, "Dispatching command");

        match command {
            Command::Help => {
                self.console.say(HELP)?;
                self.record(raw, HELP)?;
            }
            Command::RestoreMemory => {
                let outcome = self.restore_memory()?;
                tracing::debug!(?outcome, "Restore memory finished");
            }
            Command::Repair => {
                let outcome = self.repair()?;
                tracing::debug!(?outcome, "Repair finished");
            }
            Command::Memory => {
                let outcome = self.memory()?;
                tracing::debug!(?outcome, "Memory vault finished");
            }
            Command::Greet => {
                let motivation = self.greet()?;
                tracing::debug!(?motivation, "Greeting finished");
            }
            Command::Explore => {
                let outcome = self.explore()?;
                tracing::debug!(?outcome, "Exploration finished");
            }
            Command::Exit => {
                self.console.say(FAREWELL)?;
                self.record(raw, FAREWELL)?;
                return Ok(Flow::Exit);
            }
            Command::Unknown => {
                self.console.say(UNKNOWN_COMMAND)?;
                self.record(raw, UNKNOWN_COMMAND)?;
            }
        }

        Ok(Flow::Continue)
    }

    /// Close the transcript sink. Call once, after [`run`](Self::run).
    pub fn close(&mut self) -> Result<()> {
        self.sink.close()
    }

    fn record(&mut self, command: &str, response: impl Into<String>) -> Result<()> {
        self.sink
            .append(NewCommandRecord::now(self.session_id, command, response))
    }
}

/// Substitute `default` for a blank answer.
fn or_default(answer: String, default: &str) -> String {
    if answer.is_empty() {
        default.to_string()
    } else {
        answer
    }
}
