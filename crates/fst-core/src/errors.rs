//! Structured error types shared across the separation crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`FstError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sizes, etc.).
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

/// Canonical error type for the separation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum FstError {
    /// Hypergraph construction and lookup errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Corrupted branch-node state detected during separation.
    #[error("separation error: {0}")]
    Separation(ErrorInfo),
    /// Flow network or max-flow solver errors.
    #[error("flow error: {0}")]
    Flow(ErrorInfo),
    /// Parameter loading and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
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

impl FstError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FstError::Graph(info)
            | FstError::Separation(info)
            | FstError::Flow(info)
            | FstError::Config(info)
            | FstError::Serde(info) => info,
        }
    }

    /// Returns whether the error signals corrupted node state.
    ///
    /// Fatal errors must abort the whole branch-and-cut search rather than
    /// just the current separation round.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FstError::Separation(_) | FstError::Flow(_))
    }

    /// Builds a [`FstError::Separation`] error.
    pub fn separation(code: impl Into<String>, message: impl Into<String>) -> Self {
        FstError::Separation(ErrorInfo::new(code, message))
    }

    /// Builds a [`FstError::Flow`] error.
    pub fn flow(code: impl Into<String>, message: impl Into<String>) -> Self {
        FstError::Flow(ErrorInfo::new(code, message))
    }

    /// Builds a [`FstError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        FstError::Graph(ErrorInfo::new(code, message))
    }

    /// Adds a context entry to the payload, preserving the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            FstError::Graph(info) => FstError::Graph(info.with_context(key, value)),
            FstError::Separation(info) => FstError::Separation(info.with_context(key, value)),
            FstError::Flow(info) => FstError::Flow(info.with_context(key, value)),
            FstError::Config(info) => FstError::Config(info.with_context(key, value)),
            FstError::Serde(info) => FstError::Serde(info.with_context(key, value)),
        }
    }
}
