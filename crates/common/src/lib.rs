mod term;

pub mod cmd;
pub mod config;
pub mod files;
pub mod git;

pub use term::{error, logger};
