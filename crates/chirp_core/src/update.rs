use crate::{Category, Effect, LogLabel, Msg, Phase, PostResult, PostState, RunOutcome};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase are ignored.
pub fn update(mut state: PostState, msg: Msg) -> (PostState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::SelectCandidate, Msg::Start) => vec![Effect::ListPending],
        (Phase::SelectCandidate, Msg::PendingListed(names)) => {
            match names.into_iter().next() {
                Some(first) => {
                    state.claim(first.clone());
                    vec![Effect::Publish { name: first }]
                }
                None => {
                    state.exhaust();
                    vec![Effect::Finish(state.exhausted_outcome())]
                }
            }
        }
        (Phase::Attempt, Msg::PublishFinished { name, result }) => {
            if state.in_flight() != Some(name.as_str()) {
                return (state, Vec::new());
            }
            match result {
                PostResult::Success { media_id } => {
                    state.succeed();
                    vec![
                        Effect::Record {
                            name: name.clone(),
                            label: LogLabel::Posted,
                        },
                        Effect::Relocate {
                            name: name.clone(),
                            to: Category::Accepted,
                        },
                        Effect::Finish(RunOutcome::Posted {
                            name,
                            media_id,
                            attempts: state.attempts(),
                        }),
                    ]
                }
                PostResult::Failure { .. } => {
                    state.reject();
                    let mut effects = vec![
                        Effect::Record {
                            name: name.clone(),
                            label: LogLabel::Rejected,
                        },
                        Effect::Relocate {
                            name,
                            to: Category::Rejected,
                        },
                    ];
                    if state.phase() == Phase::Exhausted {
                        effects.push(Effect::Finish(state.exhausted_outcome()));
                    } else {
                        effects.push(Effect::ListPending);
                    }
                    effects
                }
            }
        }
        _ => Vec::new(),
    };

    (state, effects)
}
