//! Structured error types shared across the assignment crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SantaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (participant ids, counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for roster handling and gift assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SantaError {
    /// The roster is too small for the requested gift count (`N <= K`).
    #[error("insufficient participants: {0}")]
    InsufficientParticipants(ErrorInfo),
    /// Every attempt in the retry budget reached a giver with no eligible receivers.
    #[error("assignment deadlock: {0}")]
    Deadlock(ErrorInfo),
    /// A completed assignment violated a regularity invariant.
    #[error("verification failure: {0}")]
    VerificationFailure(ErrorInfo),
    /// Roster construction or lookup errors.
    #[error("roster error: {0}")]
    Roster(ErrorInfo),
    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl SantaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SantaError::InsufficientParticipants(info)
            | SantaError::Deadlock(info)
            | SantaError::VerificationFailure(info)
            | SantaError::Roster(info)
            | SantaError::Config(info)
            | SantaError::Serde(info) => info,
        }
    }

    /// Shorthand for the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Whether retrying the whole operation with adjusted inputs or a new seed can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SantaError::InsufficientParticipants(_) | SantaError::Deadlock(_)
        )
    }
}
