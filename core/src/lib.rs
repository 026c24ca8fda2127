#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use error::*;
pub use replay::*;

mod error;
mod replay;

pub type StepIndex = usize;

/// Identity tag of one loaded path. Callbacks carry the tag they were armed
/// for; a mismatch means the path has been replaced since.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathId(u64);

impl PathId {
    pub(crate) const fn initial() -> Self {
        Self(0)
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayState {
    pub revealed: StepIndex,
    pub current: Option<StepIndex>,
    pub running: bool,
}

impl ReplayState {
    pub const fn idle() -> Self {
        Self {
            revealed: 0,
            current: None,
            running: false,
        }
    }

    /// State after landing on `index` with the run stopped.
    pub const fn at(index: StepIndex) -> Self {
        Self {
            revealed: index + 1,
            current: Some(index),
            running: false,
        }
    }
}

impl Default for ReplayState {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Stale,
    NoChange,
    Revealed,
    Finished,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Stale => false,
            Self::NoChange => false,
            Self::Revealed => true,
            Self::Finished => true,
        }
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrubOutcome {
    Stale,
    NoChange,
    Moved,
}

impl ScrubOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Moved)
    }

    pub const fn is_stale(self) -> bool {
        matches!(self, Self::Stale)
    }
}
