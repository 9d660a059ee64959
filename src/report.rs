//! Error accumulation for decode calls.
//!
//! The engine never fails fast: every component that can fail for more than
//! one independent reason merges structured [`DecodeError`] records into a
//! per-call [`DecodeReport`] instead of returning a single error value.
//! Merging is associative and order-preserving (outer errors first, then
//! child errors in traversal order), so one decode pass surfaces every
//! defect in a document at once.
//!
//! An empty report is success. A non-empty report means the configuration is
//! rejected; destinations must be treated as only partially populated, since
//! no rollback is performed.

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The destination declaration or the node's shape is wrong: wrong node
    /// kind for a slot, a field without a source-key declaration, a dynamic
    /// declaration on a destination that cannot resolve variants.
    Structural,
    /// The data itself is wrong: scalar kind mismatch, out-of-range scalar,
    /// missing or unused keys, missing discriminator, sequence overflow.
    Value,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Structural => f.write_str("structural"),
            ErrorKind::Value => f.write_str("value"),
        }
    }
}

/// One independent decode failure, located by its breadcrumb path.
///
/// Paths are dotted/bracketed: the root is the empty string, struct fields
/// append `.key`, sequence elements append `[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeError {
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl DecodeError {
    pub fn structural(path: impl Into<String>, message: impl Into<String>) -> Self {
        DecodeError {
            path: path.into(),
            kind: ErrorKind::Structural,
            message: message.into(),
        }
    }

    pub fn value(path: impl Into<String>, message: impl Into<String>) -> Self {
        DecodeError {
            path: path.into(),
            kind: ErrorKind::Value,
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "'{}': {}", self.path, self.message)
        }
    }
}

/// Aggregate, ordered collection of every failure found in one decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeReport {
    errors: Vec<DecodeError>,
}

impl DecodeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Success iff no error was recorded anywhere in the subtree.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodeError> {
        self.errors.iter()
    }

    pub fn push(&mut self, error: DecodeError) {
        self.errors.push(error);
    }

    /// Record a structural error at `path`.
    pub fn structural(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(DecodeError::structural(path, message));
    }

    /// Record a value error at `path`.
    pub fn value(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(DecodeError::value(path, message));
    }

    /// Append all of `other`'s errors after this report's, preserving both
    /// orders.
    pub fn merge(&mut self, other: DecodeReport) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` for an empty report, otherwise the report itself.
    pub fn into_result(self) -> Result<(), DecodeReport> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl IntoIterator for DecodeReport {
    type Item = DecodeError;
    type IntoIter = std::vec::IntoIter<DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Errors surfaced by the document-level entry points.
///
/// Parse failures come from the format parsers before any binding happens;
/// [`BindError::Rejected`] carries the full decode report. Callers should
/// treat a rejection as "configuration rejected, do not proceed", not as a
/// warning.
#[derive(Debug, Error, Diagnostic)]
pub enum BindError {
    #[error("failed to parse YAML document")]
    #[diagnostic(code(treebind::parse::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON document")]
    #[diagnostic(code(treebind::parse::json))]
    Json(#[from] serde_json::Error),

    #[error("configuration rejected:\n{report}")]
    #[diagnostic(code(treebind::decode::rejected))]
    Rejected { report: DecodeReport },
}

impl BindError {
    /// The decode report, when this error is a rejection.
    pub fn report(&self) -> Option<&DecodeReport> {
        match self {
            BindError::Rejected { report } => Some(report),
            _ => None,
        }
    }
}
