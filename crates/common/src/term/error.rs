use colored::Colorize;

/// Prints a failed command's error chain to stderr.
pub fn log_error(error: anyhow::Error) {
    eprintln!("{} {error:#}", "error:".red().bold());
}
