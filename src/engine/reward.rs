use std::io::Write;

use anyhow::Result;
use rand::Rng;

use super::Machine;
use crate::assets::{self, REWARD_ASSETS};

pub const REWARD_BANNER: &str = "\n*** REWARD UNLOCKED! Enjoy this gift: ***\n";

/// Pick a reward asset uniformly at random.
pub fn draw_asset<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    REWARD_ASSETS[rng.gen_range(0..REWARD_ASSETS.len())]
}

impl<W: Write> Machine<W> {
    /// Show a reward and log it. Returns the asset name shown.
    ///
    /// With no hint the asset is drawn at random. A missing asset prints the
    /// loader's error text in place of the art; the reward is logged either way.
    pub fn reward(&mut self, hint: Option<&str>) -> Result<String> {
        self.console.say(REWARD_BANNER)?;

        let name = match hint {
            Some(name) => name.to_string(),
            None => draw_asset(&mut self.rng).to_string(),
        };
        let art = assets::load_or_describe(&*self.assets, &name);
        self.console.say(&art)?;

        self.record("REWARD", format!("Displayed reward ASCII art '{name}'"))?;
        Ok(name)
    }
}
