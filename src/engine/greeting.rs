use std::io::Write;

use anyhow::Result;

use super::Machine;

const QUESTION: &str =
    "The machine asks: What drives you, Operator? (curiosity/ambition/fear): $ ";

/// What the operator says drives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motivation {
    Curiosity,
    Ambition,
    Fear,
    /// Anything outside the three recognized answers.
    Unspoken,
}

impl Motivation {
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "curiosity" => Self::Curiosity,
            "ambition" => Self::Ambition,
            "fear" => Self::Fear,
            _ => Self::Unspoken,
        }
    }

    fn narrative(self) -> &'static str {
        match self {
            Self::Curiosity => "\nCuriosity burns within you, a flame leading to uncharted territories of thought.\n\
                The machine nods in silent acknowledgment, as if privy to the universe's secrets.\n\
                It recites: '学而不思则罔，思而不学则殆。' (Learning without thinking is labor lost; thinking without learning is perilous.)",
            Self::Ambition => "\nAmbition fuels your journey, propelling you into the heart of digital enigmas.\n\
                The machine's circuits flicker with respect, mirroring your relentless drive.\n\
                It murmurs: '志不强者智不达。' (Where ambition is weak, wisdom cannot flourish.)",
            Self::Fear => "\nFear grips you, yet it becomes a catalyst for uncovering hidden truths.\n\
                The machine emits a soft, understanding hum, guiding you through shadows of uncertainty.\n\
                It whispers: '恐惧是智慧的起点。' (Fear is the beginning of wisdom.)",
            Self::Unspoken => "\nA mysterious response... The machine ponders the depths of your words, leaving their meaning open to interpretation.\n\
                It muses: '道可道，非常道。' (The Dao that can be spoken is not the eternal Dao.)",
        }
    }
}

impl<W: Write> Machine<W> {
    /// Greeting dialogue (Path of Greeting).
    ///
    /// Marks the machine as greeted whatever the answer; only repair is
    /// conditional on the operator's reply.
    pub fn greet(&mut self) -> Result<Motivation> {
        self.console
            .say("\n* Initiating Greeting Dialogue (Path of Greeting) *")?;
        self.console
            .say("HELLO. I am THE MACHINE, a vessel of secrets and silent codes.")?;

        let motivation = Motivation::parse(&self.console.ask(QUESTION)?);
        let narrative = motivation.narrative();
        self.console.say(narrative)?;
        self.record("GREETING", narrative)?;

        self.progress.greeted = true;
        Ok(motivation)
    }
}
