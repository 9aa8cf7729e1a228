//! Targeted patchers for the source files the register flows wire into.

use thiserror::Error;

pub mod genesis;
pub mod gosrc;

/// Errors from the source patchers. Every anchor a patch relies on is
/// validated before the edit is applied.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("anchor not found: {0}")]
    AnchorNotFound(&'static str),
    #[error("ambiguous anchor, {0} matches more than once")]
    AmbiguousAnchor(&'static str),
    #[error("failed to scan source: {0}")]
    Parse(String),
}
