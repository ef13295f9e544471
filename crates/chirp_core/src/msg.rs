use crate::PostResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin a run from the initial state.
    Start,
    /// Fresh listing of the pending directory, in selection order.
    PendingListed(Vec<String>),
    /// The publisher finished with the in-flight candidate.
    PublishFinished { name: String, result: PostResult },
}
