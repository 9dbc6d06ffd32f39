//! Validation failure types.

use crate::{FileMap, SourceMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureCategory {
    /// Fails the run.
    Error,
    /// Reported only.
    Warning,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Error => write!(f, "error"),
            FailureCategory::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic produced by a validator, an enhancer or the symbol builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// The pass that reported the failure.
    pub validator_name: String,
    /// Whether the failure fails the run.
    pub category: FailureCategory,
    /// Human-readable message describing the failure.
    pub message: String,
    /// Offending token, when known.
    pub source_map: Option<SourceMap>,
    /// Offending file, when known.
    pub file_map: Option<FileMap>,
}

impl ValidationFailure {
    /// Create a new failure.
    pub fn new(
        validator_name: impl Into<String>,
        category: FailureCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            validator_name: validator_name.into(),
            category,
            message: message.into(),
            source_map: None,
            file_map: None,
        }
    }

    /// Create an error-category failure.
    pub fn error(validator_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator_name, FailureCategory::Error, message)
    }

    /// Create a warning-category failure.
    pub fn warning(validator_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator_name, FailureCategory::Warning, message)
    }

    /// Attach the offending token location.
    pub fn with_source(mut self, source_map: Option<&SourceMap>) -> Self {
        self.source_map = source_map.cloned();
        self
    }

    /// Attach the offending file location.
    pub fn with_file(mut self, file_map: Option<FileMap>) -> Self {
        self.file_map = file_map;
        self
    }

    /// Check if this is an error-category failure.
    pub fn is_error(&self) -> bool {
        matches!(self.category, FailureCategory::Error)
    }

    /// Check if this is a warning-category failure.
    pub fn is_warning(&self) -> bool {
        matches!(self.category, FailureCategory::Warning)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.category, self.validator_name, self.message)?;
        match (&self.file_map, &self.source_map) {
            (Some(file), Some(source)) => write!(f, " ({}, column {})", file, source.column),
            (Some(file), None) => write!(f, " ({})", file),
            (None, Some(source)) => write!(f, " (line {}, column {})", source.line, source.column),
            (None, None) => Ok(()),
        }
    }
}

/// Collection of validation failures, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailures {
    failures: Vec<ValidationFailure>,
}

impl ValidationFailures {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a failure.
    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Add several failures, keeping their order.
    pub fn extend(&mut self, failures: impl IntoIterator<Item = ValidationFailure>) {
        self.failures.extend(failures);
    }

    /// Check if there are any failures.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if there are any error-category failures.
    pub fn has_errors(&self) -> bool {
        self.failures.iter().any(|f| f.is_error())
    }

    /// Get all failures.
    pub fn all(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Get error-category failures.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter().filter(|f| f.is_error())
    }

    /// Get warning-category failures.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter().filter(|f| f.is_warning())
    }

    /// Failures reported by one validator.
    pub fn from_validator<'a>(
        &'a self,
        validator_name: &'a str,
    ) -> impl Iterator<Item = &'a ValidationFailure> {
        self.failures
            .iter()
            .filter(move |f| f.validator_name == validator_name)
    }

    /// Number of error-category failures.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning-category failures.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Get the number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Merge another collection after this one.
    pub fn merge(&mut self, other: ValidationFailures) {
        self.failures.extend(other.failures);
    }
}

impl From<Vec<ValidationFailure>> for ValidationFailures {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }
}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationFailures {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}
