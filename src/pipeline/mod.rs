//! Placement pipeline.
//!
//! Sequences page fetch, extraction, image fetch, duplicate check, naming,
//! writing and the optional comment step.

pub mod run;
pub mod state;

pub use run::{comment_text, MetadataStatus, Pipeline, PipelineOptions, Placement};
pub use state::{Stage, StageTracker};
