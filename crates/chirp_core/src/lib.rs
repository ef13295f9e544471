//! Chirp core: the post-with-retry workflow as a pure state machine.
mod effect;
mod msg;
mod outcome;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{PostResult, RunOutcome};
pub use state::{Category, LogLabel, Phase, PostState, DEFAULT_CEILING};
pub use update::update;
