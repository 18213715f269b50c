use std::io::Write;

use anyhow::Result;

use super::{or_default, Machine};

const HANDLE_PROMPT: &str = "1/2 State your chosen OPERATOR handle:\noperator: $ ";
const MEMORY_PROMPT: &str =
    "2/2 Share a memory that fuels your determination (or leave blank):\noperator: $ ";
const CONFIRM_PROMPT: &str =
    "\nDo you wish to attempt to fully restore the machine's core systems? (yes/no): $ ";

const UNKNOWN_OPERATOR: &str = "UNKNOWN_OPERATOR";
const NO_MEMORY: &str = "[No memory provided]";
const REWARD: &str = "checkpoint";

/// Result of the repair sequence (Path of Restoration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub operator: String,
    pub memory: String,
    /// The operator answered "yes" and the machine is now repaired.
    pub restored: bool,
}

impl<W: Write> Machine<W> {
    pub fn repair(&mut self) -> Result<RepairOutcome> {
        self.console
            .say("\n* Initiating Repair Sequence (Path of Restoration) *")?;

        let operator = or_default(self.console.ask(HANDLE_PROMPT)?, UNKNOWN_OPERATOR);
        let memory = or_default(self.console.ask(MEMORY_PROMPT)?, NO_MEMORY);
        let restored = self.console.ask(CONFIRM_PROMPT)?.to_lowercase() == "yes";

        let narrative = if restored {
            format!(
                "\nThank you, {operator}. As you affirm your intent, sparks of energy course through the circuits.\n\
                 The machine hums with renewed hope. Yet, deep within, echoes of a forgotten past stir...\n\
                 As the ancient Chinese proverb says: '千里之行，始于足下。' (A journey of a thousand miles begins with a single step.)\n"
            )
        } else {
            format!(
                "\nUnderstood, {operator}. You choose to leave the machine in its enigmatic state.\n\
                 A quiet melancholy settles, and the machine retreats into introspection, its secrets locked away.\n\
                 As the Daoists say: '无为而无不为。' (By doing nothing, everything is done.)\n"
            )
        };
        self.console.say(&narrative)?;
        self.record("REPAIR", narrative)?;

        if restored {
            self.progress.repaired = true;
            tracing::info!(operator = %operator, "Machine repaired");
            self.reward(Some(REWARD))?;
        }

        Ok(RepairOutcome {
            operator,
            memory,
            restored,
        })
    }
}
