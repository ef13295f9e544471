use std::fmt;

use crate::RunOutcome;

/// Default maximum number of publish attempts per run.
pub const DEFAULT_CEILING: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    SelectCandidate,
    Attempt,
    Succeeded,
    Exhausted,
}

/// The three directory categories a photo can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pending,
    Accepted,
    Rejected,
}

impl Category {
    /// Directory name; part of the observable filesystem layout.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Pending => "photos",
            Category::Accepted => "posted_photos",
            Category::Rejected => "photos_rejected",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Outcome label written to the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLabel {
    Posted,
    Rejected,
}

impl LogLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLabel::Posted => "Posted",
            LogLabel::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LogLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostState {
    phase: Phase,
    attempts: u32,
    ceiling: u32,
    in_flight: Option<String>,
    rejected: Vec<String>,
}

impl Default for PostState {
    fn default() -> Self {
        Self::with_ceiling(DEFAULT_CEILING)
    }
}

impl PostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ceiling of zero would never attempt anything; it is clamped to one.
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            phase: Phase::SelectCandidate,
            attempts: 0,
            ceiling: ceiling.max(1),
            in_flight: None,
            rejected: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Outcome of a run that stops without posting: `NothingPending` when
    /// no attempt was made, otherwise `Exhausted`.
    pub fn exhausted_outcome(&self) -> RunOutcome {
        if self.attempts == 0 {
            RunOutcome::NothingPending
        } else {
            RunOutcome::Exhausted {
                attempts: self.attempts,
                rejected: self.rejected.clone(),
            }
        }
    }

    pub(crate) fn claim(&mut self, name: String) {
        self.in_flight = Some(name);
        self.phase = Phase::Attempt;
    }

    pub(crate) fn succeed(&mut self) {
        self.attempts += 1;
        self.in_flight = None;
        self.phase = Phase::Succeeded;
    }

    pub(crate) fn reject(&mut self) {
        if let Some(name) = self.in_flight.take() {
            self.rejected.push(name);
        }
        self.attempts += 1;
        self.phase = if self.attempts >= self.ceiling {
            Phase::Exhausted
        } else {
            Phase::SelectCandidate
        };
    }

    pub(crate) fn exhaust(&mut self) {
        self.in_flight = None;
        self.phase = Phase::Exhausted;
    }
}
