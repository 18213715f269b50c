//! Domain models for THE MACHINE.
//!
//! - [`Progress`]: the two flags that gate memory restoration.
//! - [`CommandRecord`]: an append-only transcript entry (command, response, time).

mod progress;
mod record;

pub use progress::*;
pub use record::*;
