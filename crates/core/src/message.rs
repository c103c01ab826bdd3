//! User-visible diagnostics as values.
//!
//! The bulk flows never write to stdio themselves; they hand [`Message`]
//! values to the host, which decides where and how to render them. That
//! keeps the flows silent under test and lets the embedding prompt loop
//! route output through its own machinery (colors, pagers, prompts).

use std::fmt;

/// How a message should be weighted by the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Failure diagnostics; conventionally rendered to stderr.
    Error,
    /// Recoverable oddities worth the user's attention.
    Warning,
    /// Status output such as change summaries and final reports.
    Notice,
}

/// A single user-visible diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    severity: Severity,
    text: String,
}

impl Message {
    /// Builds an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    /// Builds a warning message.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    /// Builds a status message.
    #[must_use]
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notice,
            text: text.into(),
        }
    }

    /// The message weight.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// The rendered text, without a trailing newline.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
