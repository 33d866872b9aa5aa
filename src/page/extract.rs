//! Positional extraction of the image, caption and alt text from the daily page.
//!
//! The page layout has been stable for decades, so these are line-oriented
//! heuristics rather than an HTML parser.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::page::sanitize::{collapse_to_one_line, sanitize_filename_text};

/// Alt text that means "no description here".
const NO_DESCRIPTION_SENTINEL: &str = "See Explanation";

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)img.*?src=").unwrap());

static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());

static BOLD_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<b>").unwrap());

static CAPTION_TAGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?b>|<br\s*/?>").unwrap());

static ALT_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)alt=").unwrap());

static ALT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?is)^.*?alt=\s*"?"#).unwrap());

/// Reference to the page's image, relative to the page's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub relative_path: String,
    /// Extension of the final path segment, case preserved, never empty.
    pub extension: String,
}

impl ImageReference {
    /// Build a reference, deriving the extension from the final path segment.
    pub fn from_relative_path(relative_path: &str) -> Result<Self> {
        let segment = relative_path.rsplit('/').next().unwrap_or(relative_path);

        let extension = match segment.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_string(),
            _ => {
                return Err(Error::MalformedImageTag(format!(
                    "image source '{}' has no file extension",
                    relative_path
                )))
            }
        };

        Ok(Self {
            relative_path: relative_path.to_string(),
            extension,
        })
    }
}

/// Everything pulled out of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub image: ImageReference,
    pub caption: String,
    pub description: String,
}

/// Run all three extractors over a page.
pub fn extract(page: &str, page_url: &str) -> Result<Extraction> {
    Ok(Extraction {
        image: extract_image_reference(page, page_url)?,
        caption: extract_caption(page),
        description: extract_descriptive_text(page),
    })
}

/// Find the first image tag and return its quoted source.
///
/// `page_url` is only used to name the page in the error.
pub fn extract_image_reference(page: &str, page_url: &str) -> Result<ImageReference> {
    for line in page.lines() {
        let Some(marker) = IMG_SRC_RE.find(line) else {
            continue;
        };

        let rest = &line[marker.end()..];
        let source = QUOTED_RE
            .captures(rest)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| {
                Error::MalformedImageTag(format!("no quoted source in '{}'", line.trim()))
            })?;

        return ImageReference::from_relative_path(source.as_str());
    }

    Err(Error::NoImageFound {
        url: page_url.to_string(),
    })
}

/// Caption from the first bold line, made safe for use as a filename.
///
/// Returns an empty string when the page has no bold text.
pub fn extract_caption(page: &str) -> String {
    page.lines()
        .find(|line| BOLD_OPEN_RE.is_match(line))
        .map(|line| sanitize_filename_text(&CAPTION_TAGS_RE.replace_all(line, "")))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AltScan {
    NotCollecting,
    Collecting,
    Done,
}

/// The image's alt text on one line, or empty when the page offers none.
pub fn extract_descriptive_text(page: &str) -> String {
    let mut state = AltScan::NotCollecting;
    let mut collected: Vec<&str> = Vec::new();

    for line in page.lines() {
        match state {
            AltScan::NotCollecting => {
                let Some(start) = ALT_START_RE.find(line) else {
                    continue;
                };
                collected.push(line);

                // The opening quote on this line does not close the attribute.
                let rest = line[start.end()..].trim_start();
                let rest = rest.strip_prefix('"').unwrap_or(rest);
                state = if ends_with_quote(rest) {
                    AltScan::Done
                } else {
                    AltScan::Collecting
                };
            }
            AltScan::Collecting => {
                collected.push(line);
                if ends_with_quote(line) {
                    state = AltScan::Done;
                }
            }
            AltScan::Done => break,
        }
    }

    if collected.is_empty() {
        return String::new();
    }

    let joined = collected.join("\n");
    let without_prefix = ALT_PREFIX_RE.replace(&joined, "");
    let without_quote = without_prefix.trim_end();
    let without_quote = without_quote.strip_suffix('"').unwrap_or(without_quote);
    let text = collapse_to_one_line(without_quote).trim().to_string();

    if text.is_empty() || text.starts_with(NO_DESCRIPTION_SENTINEL) {
        tracing::debug!("Page has no usable alt text");
        return String::new();
    }

    text
}

fn ends_with_quote(text: &str) -> bool {
    text.trim_end().ends_with('"')
}
