//! Network module.
//!
//! This module provides:
//! - The `Fetcher` seam used by the pipeline
//! - A `reqwest` implementation with spinners and progress bars

pub mod client;

pub use client::{Fetcher, HttpFetcher};
