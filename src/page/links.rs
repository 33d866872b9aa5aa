//! URLs derived from the page address.

use chrono::NaiveDate;
use url::Url;

use crate::error::Result;
use crate::page::extract::ImageReference;

/// Absolute URL of the image: the page's directory joined with the relative path.
pub fn resolve_image_url(page_url: &str, image: &ImageReference) -> Result<Url> {
    let base = Url::parse(page_url)?;
    Ok(base.join(&image.relative_path)?)
}

/// Permanent link to the page published on `date`, e.g. `ap241017.html`.
pub fn permalink(page_url: &str, date: NaiveDate) -> Result<Url> {
    let base = Url::parse(page_url)?;
    let page_name = date.format("ap%y%m%d.html").to_string();
    Ok(base.join(&page_name)?)
}
