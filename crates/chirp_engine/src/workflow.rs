use std::collections::VecDeque;

use chirp_core::{
    update, Category, Effect, LogLabel, Msg, PostResult, PostState, RunOutcome, DEFAULT_CEILING,
};
use chirp_logging::{chirp_error, chirp_info, chirp_warn};

use crate::{ActivityLog, PhotoStore, Publisher};

/// Runs one post-with-retry cycle against a store, a publisher and a log.
///
/// Only publish failures move on to the next candidate. Store and log
/// failures are reported and the run carries on.
pub struct Workflow<'a> {
    store: &'a PhotoStore,
    publisher: &'a dyn Publisher,
    log: &'a ActivityLog,
    ceiling: u32,
}

impl<'a> Workflow<'a> {
    pub fn new(store: &'a PhotoStore, publisher: &'a dyn Publisher, log: &'a ActivityLog) -> Self {
        Self {
            store,
            publisher,
            log,
            ceiling: DEFAULT_CEILING,
        }
    }

    pub fn with_ceiling(mut self, ceiling: u32) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub async fn run(&self) -> RunOutcome {
        let mut state = PostState::with_ceiling(self.ceiling);
        let mut inbox = VecDeque::from([Msg::Start]);

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;

            for effect in effects {
                match effect {
                    Effect::ListPending => {
                        if state.attempts() > 0 {
                            chirp_info!(
                                "Retrying with the next photo... Attempt {}/{}",
                                state.attempts(),
                                state.ceiling()
                            );
                        }
                        inbox.push_back(Msg::PendingListed(self.list_pending()));
                    }
                    Effect::Publish { name } => {
                        let result = self.publish(&name).await;
                        inbox.push_back(Msg::PublishFinished { name, result });
                    }
                    Effect::Record { name, label } => self.record(&name, label),
                    Effect::Relocate { name, to } => self.relocate(&name, to),
                    Effect::Finish(outcome) => return outcome,
                }
            }
        }

        // Every non-terminal step queues a follow-up message, so the inbox
        // only drains after `Finish` has returned above.
        state.exhausted_outcome()
    }

    fn list_pending(&self) -> Vec<String> {
        match self.store.list_pending() {
            Ok(photos) => {
                if photos.is_empty() {
                    chirp_info!("No photos found in the directory. Waiting for new photos...");
                }
                photos.into_iter().map(|photo| photo.name).collect()
            }
            Err(err) => {
                chirp_error!("Failed to list pending photos: {}", err);
                Vec::new()
            }
        }
    }

    async fn publish(&self, name: &str) -> PostResult {
        let path = self.store.pending_path(name);
        match self.publisher.publish(&path).await {
            Ok(media_id) => {
                chirp_info!("Posted photo '{}' with media ID: {}", name, media_id);
                PostResult::Success { media_id }
            }
            Err(err) => {
                chirp_warn!("Failed to post photo '{}': {}", name, err);
                PostResult::Failure {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn record(&self, name: &str, label: LogLabel) {
        if let Err(err) = self.log.record(name, label) {
            chirp_warn!("{}", err);
        }
    }

    fn relocate(&self, name: &str, to: Category) {
        if let Err(err) = self.store.relocate(name, to) {
            chirp_warn!("Failed to move photo: {}", err);
        }
    }
}
