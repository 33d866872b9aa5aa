//! apotd - save the astronomy picture of the day
//!
//! Fetches the daily page, pulls out its image, caption and description, and
//! saves the image into a directory of earlier pictures.
//!
//! # Features
//!
//! - Filename from the page caption, or a user-supplied one
//! - Content-hash duplicate detection against the destination directory
//! - Optional running four-digit filename prefix
//! - Finder comment with the description and permanent link on macOS
//! - Failure mail to an operator
//!
//! # Example
//!
//! ```no_run
//! use apotd::fs::SniffingFileTypes;
//! use apotd::metadata::NoopMetadataWriter;
//! use apotd::net::HttpFetcher;
//! use apotd::{Pipeline, PipelineOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpFetcher::new("apotd", false)?;
//!     let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);
//!     let placement = pipeline
//!         .run(&PipelineOptions {
//!             page_url: "https://apod.nasa.gov/apod/astropix.html".into(),
//!             directory: "pictures".into(),
//!             filename: None,
//!             prepend_count: true,
//!             debug: false,
//!             today: chrono::Local::now().date_naive(),
//!         })
//!         .await?;
//!     println!("{}", placement.path.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod fs;
pub mod metadata;
pub mod net;
pub mod notify;
pub mod output;
pub mod page;
pub mod pipeline;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use page::{Extraction, ImageReference};
pub use pipeline::{MetadataStatus, Pipeline, PipelineOptions, Placement};
