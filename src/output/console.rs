//! Console output utilities.

use console::style;

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print a debug message.
pub fn print_debug(message: &str) {
    eprintln!("{} {}", style("DEBUG").dim(), message);
}

/// Print the effective settings of a run.
pub fn print_run_summary(page_url: &str, directory: &str, filename: Option<&str>) {
    eprintln!("{}", style("Configuration:").bold());
    eprintln!("  Page: {}", page_url);
    eprintln!("  Directory: {}", directory);
    eprintln!("  Filename: {}", filename.unwrap_or("(from caption)"));
}
