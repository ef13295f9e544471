use crate::{Category, LogLabel, RunOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListPending,
    Publish { name: String },
    Record { name: String, label: LogLabel },
    Relocate { name: String, to: Category },
    Finish(RunOutcome),
}
