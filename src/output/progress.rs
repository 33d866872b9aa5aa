//! Progress display for the page fetch and the image download.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the page itself is fetched; cleared when the fetch ends.
pub fn create_fetch_spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("·✢✳✶✻✽✻✶✳✢ "),
    );
    spinner.set_message(format!("Reading {}", url));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Byte bar for the one image a run downloads, labelled with its file name.
pub fn create_image_bar(url: &str, total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg:.bold} {wide_bar:.yellow/dim} {bytes}/{total_bytes} {bytes_per_sec}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸ "),
    );
    bar.set_message(image_label(url));
    bar
}

/// Last path segment of the image URL, or the URL itself.
fn image_label(url: &str) -> String {
    url.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(url)
        .to_string()
}
