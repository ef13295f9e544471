/// Result of a single publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostResult {
    Success { media_id: String },
    Failure { reason: String },
}

/// How a workflow run ended.
///
/// `NothingPending` and `Exhausted` are both the terminal `Exhausted` phase;
/// they are split here so callers can tell "no work" from "all attempts failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Posted {
        name: String,
        media_id: String,
        attempts: u32,
    },
    NothingPending,
    Exhausted {
        attempts: u32,
        rejected: Vec<String>,
    },
}
