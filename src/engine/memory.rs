use std::io::Write;

use anyhow::Result;

use super::Machine;

const MEMORY_PROMPT: &str = "Share a memory that resonates with the machine:\noperator: $ ";

// Not one of the shipped assets; the vault's reward renders as a load error.
const REWARD: &str = "starst";

/// Result of the memory vault (Path of Reminiscence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryOutcome {
    /// The operator chose to delve deeper and was rewarded.
    Delved { memory: String },
    /// The operator let the memory rest.
    Rested { memory: String },
    /// No memory was shared.
    Silent,
}

impl<W: Write> Machine<W> {
    pub fn memory(&mut self) -> Result<MemoryOutcome> {
        self.console
            .say("\n* Entering the Memory Vault (Path of Reminiscence) *")?;

        let memory = self.console.ask(MEMORY_PROMPT)?;
        if memory.is_empty() {
            let narrative = "No memory was shared. Yet, the machine whispers that sometimes silence speaks louder than words.\n";
            self.console.say(&format!("\n{narrative}"))?;
            self.record("MEMORY", narrative)?;
            return Ok(MemoryOutcome::Silent);
        }

        let mut narrative = format!(
            "\nMemory recorded: '{memory}'\n\
             As the memory is archived, fleeting images and cryptic symbols cascade through the machine's banks.\n\
             Do you wish to delve deeper into this memory? (yes/no): "
        );
        let delve = self.console.ask(&narrative)?.to_lowercase() == "yes";

        let continuation = if delve {
            "\nYou dive deeper, unraveling layers of emotion and code that hint at a past defying time.\n\
             The machine whispers: '回忆是时光的礼物。' (Memories are gifts from time.)"
        } else {
            "\nYou let the memory rest, a quiet echo of what once was.\n\
             The machine murmurs: '静水流深。' (Still waters run deep.)"
        };
        self.console.say(continuation)?;
        narrative.push_str(continuation);
        self.record("MEMORY", narrative)?;

        if delve {
            self.reward(Some(REWARD))?;
            Ok(MemoryOutcome::Delved { memory })
        } else {
            Ok(MemoryOutcome::Rested { memory })
        }
    }
}
