use std::io::Write;

use anyhow::Result;

use super::Machine;

/// Answers allowed per enigma.
pub const MAX_ATTEMPTS: usize = 2;

const LOCKED: &str = "You can only restore the memory after you repair and greet me!";
const FRAGMENT_PROMPT: &str =
    "Enter a memory fragment that you believe holds the key to restoration:\noperator: $ ";
const ENIGMA_PROMPT: &str = "Which enigma do you choose? (Italian/Chinese): $ ";
const ANSWER_PROMPT: &str = "Your answer: $ ";
const GIVE_UP: &str = "\nThat's it. Never stop trying. 永不放弃。";

/// The riddles guarding the gift location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnigmaKind {
    Italian,
    Chinese,
}

struct Enigma {
    label: &'static str,
    riddle: &'static str,
    /// Lowercase accepted answers, compared exactly.
    answers: &'static [&'static str],
    unlocked: &'static str,
    reward: &'static str,
}

static ITALIAN: Enigma = Enigma {
    label: "Italian",
    riddle: "Una fiera di ferro è in agguato in un tunnel di tenebra. Se la batti ti colpisce. Cos'è?",
    answers: &["proiettile"],
    unlocked: "\nCorrect! The location has been unlocked.\n\
        Gift delivery appointment:\n  Location: Via dei Segreti 42\n  Time: 3:00 PM on 05/02/2025\n",
    reward: "poem",
};

static CHINESE: Enigma = Enigma {
    label: "Chinese",
    riddle: "什么东西越洗越脏？ (What gets dirtier the more you wash it?)",
    answers: &["water", "水"],
    unlocked: "\nCorrect! The location has been unlocked.\n\
        Gift delivery location:\n  Location: 龙门客栈 Artusi Ristorante\n",
    reward: "other",
};

impl EnigmaKind {
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "italian" => Some(Self::Italian),
            "chinese" => Some(Self::Chinese),
            _ => None,
        }
    }

    fn enigma(self) -> &'static Enigma {
        match self {
            Self::Italian => &ITALIAN,
            Self::Chinese => &CHINESE,
        }
    }

    /// Whether `answer` solves this enigma. Case and padding are ignored.
    pub fn accepts(self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        self.enigma().answers.iter().any(|accepted| *accepted == answer)
    }
}

/// Result of the memory restoration mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Repair and greeting are not both done yet.
    Locked,
    /// The operator gave no memory fragment.
    NoFragment,
    /// Neither enigma was chosen.
    NoEnigma,
    Solved(EnigmaKind),
    /// Every attempt was used without a correct answer.
    Failed(EnigmaKind),
}

impl<W: Write> Machine<W> {
    /// Memory restoration mission.
    ///
    /// Open only once the machine is both repaired and greeted; checked on
    /// every call. A restored memory leads to an enigma with
    /// [`MAX_ATTEMPTS`] tries whose answer unlocks the gift location.
    pub fn restore_memory(&mut self) -> Result<RestoreOutcome> {
        if !self.progress.can_restore() {
            self.console.say(LOCKED)?;
            self.record(
                "RESTORE MEMORY",
                "Attempted restore memory before repair/greeting.",
            )?;
            return Ok(RestoreOutcome::Locked);
        }

        self.console.say("\n* Initiating Memory Restoration Mission *")?;
        self.console
            .say("The machine's memory is fragmented and lost in time.")?;

        let fragment = self.console.ask(FRAGMENT_PROMPT)?;
        if fragment.is_empty() {
            self.console
                .say("\nNo memory fragment provided. The mission cannot proceed.")?;
            self.record("RESTORE MEMORY", "No memory fragment provided.")?;
            return Ok(RestoreOutcome::NoFragment);
        }

        self.console.say(
            "\nMemory fragment recorded. The machine begins to reassemble its past...\n\
             Restoration complete. The machine's memory is now whole.\n",
        )?;
        self.record("RESTORE MEMORY", format!("Memory fragment: {fragment}"))?;

        self.console
            .say("To access the location for your gift delivery, you must solve an enigma.")?;
        let Some(kind) = EnigmaKind::parse(&self.console.ask(ENIGMA_PROMPT)?) else {
            self.console
                .say("\nInvalid choice. The enigma remains unsolved.")?;
            self.record("ENIGMA", "No valid enigma selected.")?;
            return Ok(RestoreOutcome::NoEnigma);
        };

        self.solve_enigma(kind)
    }

    fn solve_enigma(&mut self, kind: EnigmaKind) -> Result<RestoreOutcome> {
        let enigma = kind.enigma();
        self.console.say(&format!("\nEnigma ({}):", enigma.label))?;
        self.console.say(enigma.riddle)?;
        self.console
            .say(&format!("Warning: You have only {MAX_ATTEMPTS} trials."))?;

        let mut solved = false;
        for attempt in 1..=MAX_ATTEMPTS {
            let answer = self.console.ask(ANSWER_PROMPT)?;
            if kind.accepts(&answer) {
                solved = true;
                break;
            }
            let left = MAX_ATTEMPTS - attempt;
            if left > 0 {
                self.console
                    .say(&format!("Incorrect. You have {left} trial(s) left."))?;
            }
        }

        if solved {
            self.console.say(enigma.unlocked)?;
            self.record(
                "ENIGMA",
                format!("{} enigma solved; location provided.", enigma.label),
            )?;
            tracing::info!(enigma = enigma.label, "Enigma solved");
            self.reward(Some(enigma.reward))?;
            Ok(RestoreOutcome::Solved(kind))
        } else {
            self.console.say(GIVE_UP)?;
            self.record(
                "ENIGMA",
                format!("{} enigma failed after two attempts.", enigma.label),
            )?;
            Ok(RestoreOutcome::Failed(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(EnigmaKind::parse("Italian"), Some(EnigmaKind::Italian));
        assert_eq!(EnigmaKind::parse(" CHINESE "), Some(EnigmaKind::Chinese));
        assert_eq!(EnigmaKind::parse("latin"), None);
        assert_eq!(EnigmaKind::parse(""), None);
    }

    #[test]
    fn test_italian_answer() {
        assert!(EnigmaKind::Italian.accepts("proiettile"));
        assert!(EnigmaKind::Italian.accepts("  Proiettile "));
        assert!(!EnigmaKind::Italian.accepts("un proiettile"));
        assert!(!EnigmaKind::Italian.accepts("water"));
    }

    #[test]
    fn test_chinese_accepts_either_language() {
        assert!(EnigmaKind::Chinese.accepts("water"));
        assert!(EnigmaKind::Chinese.accepts("WATER"));
        assert!(EnigmaKind::Chinese.accepts("水"));
        assert!(!EnigmaKind::Chinese.accepts("水水"));
        assert!(!EnigmaKind::Chinese.accepts("proiettile"));
    }
}
