//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Astronomy picture of the day saver.
#[derive(Parser, Debug)]
#[command(
    name = "apotd",
    version,
    about = "Save today's astronomy picture of the day",
    long_about = "Fetches the daily picture page, saves its image under a name taken from the caption,\n\
                  skips images already saved (by content), and on macOS attaches the description\n\
                  as a Finder comment."
)]
pub struct Args {
    /// Destination directory [default: <Pictures>/apotd].
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Filename stem; the image's extension is appended automatically.
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Prefix the filename with a running four-digit count.
    #[arg(short, long)]
    pub prepend_count: bool,

    /// Page to read instead of today's.
    #[arg(long)]
    pub url: Option<String>,

    /// Path to configuration file [default: <config dir>/apotd/config.toml].
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Mail failures to this address.
    #[arg(long, env = "APOTD_MAIL_TO")]
    pub mail_to: Option<String>,

    /// Don't attach the description as a file comment.
    #[arg(long)]
    pub no_metadata: bool,

    /// Hide spinners and progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging and state dumps.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(dir) = self.dir {
            config.options.download_directory = Some(dir);
        }

        if let Some(filename) = self.filename {
            config.options.filename = Some(filename);
        }

        if let Some(url) = self.url {
            config.source.page_url = url;
        }

        if let Some(address) = self.mail_to {
            config.notify.mail_to = Some(address);
        }

        // Boolean flags (only override if set to non-default)
        if self.prepend_count {
            config.options.prepend_count = true;
        }

        if self.no_metadata {
            config.options.write_metadata = false;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
