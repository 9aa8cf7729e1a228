use std::fmt::Display;

use colored::Colorize;

/// Prints the opening banner of a command.
pub fn intro(msg: impl Display) {
    println!("{}", msg.to_string().as_str().bold());
}

/// Prints the closing message of a command.
pub fn outro(msg: impl Display) {
    println!("{}", msg.to_string().as_str().green().bold());
}

/// Prints a progress step.
pub fn step(msg: impl Display) {
    println!("{} {msg}", "›".cyan());
}

/// Prints an informational line.
pub fn info(msg: impl Display) {
    println!("{msg}");
}
