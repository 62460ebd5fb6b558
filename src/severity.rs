//! Diagnostic severity levels.

use serde::Serialize;

/// Severity of a diagnostic, totally ordered from least to most important.
///
/// The ordering itself is load-bearing: `Severity::Error` is the only level
/// that counts toward "compilation failed", and comparisons (`>=
/// Severity::Warning`, etc.) rely on the declaration order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A note, not indicating an error on its own, but providing context for
    /// one.
    Note,
    /// A proposed change that does not itself indicate a problem.
    Suggestion,
    /// A likely problem that does not prevent compilation from succeeding.
    Warning,
    /// A problem that makes the program invalid.
    Error,
}

impl Severity {
    /// Whether this severity counts toward "compilation failed".
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Suggestion => write!(f, "suggestion"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
