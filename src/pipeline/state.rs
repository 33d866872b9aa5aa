//! Pipeline stages.

use std::fmt;

/// Where a run currently is. A failure ends the run in whatever stage it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Fetching,
    Extracting,
    FetchingImage,
    CheckingDuplicate,
    BuildingName,
    Writing,
    WritingMetadata,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetching => write!(f, "fetching page"),
            Stage::Extracting => write!(f, "extracting"),
            Stage::FetchingImage => write!(f, "fetching image"),
            Stage::CheckingDuplicate => write!(f, "checking for duplicates"),
            Stage::BuildingName => write!(f, "building filename"),
            Stage::Writing => write!(f, "writing image"),
            Stage::WritingMetadata => write!(f, "writing metadata"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// Tracks the current stage and logs transitions.
#[derive(Debug, Default)]
pub struct StageTracker {
    current: Stage,
}

impl StageTracker {
    pub fn current(&self) -> Stage {
        self.current
    }

    pub fn advance(&mut self, next: Stage) {
        tracing::debug!("Stage: {} -> {}", self.current, next);
        self.current = next;
    }
}
