//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Spinners and progress bars

pub mod console;
pub mod progress;

pub use console::{
    print_debug, print_error, print_run_summary, print_success, print_warning,
};
pub use progress::{create_fetch_spinner, create_image_bar};
