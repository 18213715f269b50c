use serde::{Deserialize, Serialize};

/// Progress flags for one run of the machine.
///
/// Both start false and are only ever set, never cleared. Nothing is carried
/// over between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Set when the operator confirms the repair sequence.
    pub repaired: bool,
    /// Set by every completed greeting dialogue, whatever the answer.
    pub greeted: bool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory restoration opens only after both repair and greeting.
    pub fn can_restore(&self) -> bool {
        self.repaired && self.greeted
    }
}
