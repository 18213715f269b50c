/// A top-level operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    RestoreMemory,
    Repair,
    Memory,
    Greet,
    Explore,
    Exit,
    Unknown,
}

impl Command {
    /// Normalize raw input (trim, lowercase) and look it up.
    ///
    /// Returns `None` for blank input, which the prompt silently skips.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        let command = match normalized.as_str() {
            "" => return None,
            "help" => Self::Help,
            "restore memory" => Self::RestoreMemory,
            "repair" => Self::Repair,
            "memory" => Self::Memory,
            "say hello" | "greet system" => Self::Greet,
            "explore" => Self::Explore,
            "exit" | "quit" => Self::Exit,
            _ => Self::Unknown,
        };
        Some(command)
    }
}
