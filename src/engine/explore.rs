use std::io::Write;

use anyhow::Result;

use super::Machine;

const CORRIDOR_PROMPT: &str = "Which corridor do you choose? (blue/red): $ ";
const REWARD: &str = "cat";

const BLUE_INTRO: &str = "\nYou step into the blue corridor, where walls shimmer with holographic memories.\n\
    Fragments of past interactions echo around you, each whispering secrets of a forgotten network.\n\
    A digital apparition appears, offering you a riddle: 'What has keys but can't open locks?'";
const BLUE_SOLVED: &str = "\nThe apparition smiles as your answer resonates. A hidden door opens, revealing an archive of lost knowledge.\n\
    The machine whispers: '知识是通向自由的钥匙。' (Knowledge is the key to freedom.)";
const BLUE_UNSOLVED: &str = "\nThe apparition fades, leaving you with a mystery unresolved as the corridor stretches on into the unknown.\n\
    The machine murmurs: '谜题未解，心未安。' (The puzzle remains unsolved; the heart remains unsettled.)";

const RED_INTRO: &str = "\nYou venture into the red corridor, where each step pulsates with raw energy.\n\
    Rhythmic beats guide you deeper into the machine's digital heart.\n\
    An inscription on the wall reads: 'To progress, you must surrender a secret.'";
const RED_SILENT: &str = "\nSilence prevails; the corridor hums as if waiting for your revelation.\n\
    The machine murmurs: '无言之言，最为深奥。' (The unspoken words are the most profound.)";

const LOST: &str = "\nDisoriented by indecision, you wander aimlessly in the labyrinth.\n\
    The machine's code shimmers with uncertainty, and soon you find yourself back at the beginning.\n\
    The machine whispers: '迷途知返，未为晚也。' (It's never too late to turn back from a wrong path.)";

/// Result of the labyrinth (Path of Obfuscation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreOutcome {
    Blue { solved: bool },
    /// `secret` is `None` when the operator kept silent.
    Red { secret: Option<String> },
    /// Neither corridor was chosen.
    Lost,
}

impl ExploreOutcome {
    pub fn rewarded(&self) -> bool {
        matches!(
            self,
            Self::Blue { solved: true } | Self::Red { secret: Some(_) }
        )
    }
}

impl<W: Write> Machine<W> {
    pub fn explore(&mut self) -> Result<ExploreOutcome> {
        self.console
            .say("\n* Entering the Labyrinth (Path of Obfuscation) *")?;
        self.console.say("You find yourself in a digital labyrinth, where data flows like streams of light and shadows hide in the code.")?;
        self.console.say("Before you lie two corridors: one bathed in a soft blue glow, the other in a warm red luminescence.")?;

        let corridor = self.console.ask(CORRIDOR_PROMPT)?.to_lowercase();
        let (outcome, narrative) = match corridor.as_str() {
            "blue" => {
                self.console.say(BLUE_INTRO)?;
                let answer = self.console.ask("Your answer: $ ")?.to_lowercase();
                let solved = answer.contains("piano");
                let ending = if solved { BLUE_SOLVED } else { BLUE_UNSOLVED };
                self.console.say(ending)?;
                (ExploreOutcome::Blue { solved }, format!("{BLUE_INTRO}{ending}"))
            }
            "red" => {
                self.console.say(RED_INTRO)?;
                let secret = self.console.ask("Share one now: $ ")?;
                let ending = if secret.is_empty() {
                    RED_SILENT.to_string()
                } else {
                    format!(
                        "\nYour secret, '{secret}', is absorbed by the corridor, triggering a surge of vibrant data.\n\
                         Hidden circuits awaken around you, as if in silent celebration.\n\
                         The machine whispers: '真诚是心灵的桥梁。' (Sincerity is the bridge of the soul.)"
                    )
                };
                self.console.say(&ending)?;
                let secret = (!secret.is_empty()).then_some(secret);
                (ExploreOutcome::Red { secret }, format!("{RED_INTRO}{ending}"))
            }
            _ => {
                self.console.say(LOST)?;
                (ExploreOutcome::Lost, LOST.to_string())
            }
        };
        self.record("EXPLORE", narrative)?;

        if outcome.rewarded() {
            self.reward(Some(REWARD))?;
        }
        Ok(outcome)
    }
}
