//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static MAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_page_url(&config.source.page_url)?;

    if let Some(filename) = &config.options.filename {
        validate_filename(filename)?;
    }

    if let Some(address) = &config.notify.mail_to {
        validate_mail_address(address)?;
    }

    Ok(())
}

/// The page URL must be absolute http(s).
pub fn validate_page_url(page_url: &str) -> Result<()> {
    let url = Url::parse(page_url).map_err(|e| Error::ConfigValidation {
        field: "page_url".to_string(),
        message: format!("'{}' is not a valid URL: {}", page_url, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: "page_url".to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

/// A user-supplied filename stem must stay inside the destination directory.
pub fn validate_filename(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "filename".to_string(),
            message: "Filename cannot be empty or whitespace-only".to_string(),
        });
    }

    let stem = name.trim();
    if stem == "." || stem == ".." || name.contains('/') || name.contains('\\') {
        return Err(Error::ConfigValidation {
            field: "filename".to_string(),
            message: format!("Path components not allowed in filename: '{}'", name),
        });
    }

    if name.contains('\0') {
        return Err(Error::ConfigValidation {
            field: "filename".to_string(),
            message: "Null bytes not allowed in filename".to_string(),
        });
    }

    Ok(())
}

/// Operator address must look like `local@domain`.
pub fn validate_mail_address(address: &str) -> Result<()> {
    if !MAIL_RE.is_match(address) {
        return Err(Error::ConfigValidation {
            field: "mail_to".to_string(),
            message: format!("'{}' is not a mail address", address),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_page_url() {
        assert!(validate_page_url("https://apod.nasa.gov/apod/astropix.html").is_ok());
        assert!(validate_page_url("ftp://example.com/x.html").is_err());
        assert!(validate_page_url("astropix.html").is_err());
    }

    #[test]
    fn test_filename() {
        assert!(validate_filename("Dark Nebulae").is_ok());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("   ").is_err());
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename(".").is_err());
        assert!(validate_filename("Wow... a comet").is_ok());
        assert!(validate_filename("M31..Andromeda").is_ok());
        assert!(validate_filename("a/b").is_err());
        assert!(validate_filename("a\\b").is_err());
        assert!(validate_filename("a\0b").is_err());
    }

    #[test]
    fn test_mail_address() {
        assert!(validate_mail_address("ops@example.com").is_ok());
        assert!(validate_mail_address("root@localhost").is_ok());
        assert!(validate_mail_address("ops").is_err());
        assert!(validate_mail_address("a b@c").is_err());
    }

    #[test]
    fn test_invalid_filename_in_config() {
        let mut config = Config::default();
        config.options.filename = Some("../escape".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { ref field, .. }) if field == "filename"
        ));
    }
}
