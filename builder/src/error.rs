//! Errors from walking the parse tree.

use metaed_model::BuildError;
use thiserror::Error;

/// The walk stopped building at least one namespace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Symbol building failed with {} error(s); first: {}", .errors.len(), first_error(.errors))]
pub struct WalkError {
    /// Build errors in the order they happened.
    pub errors: Vec<BuildError>,
}

impl WalkError {
    pub fn new(errors: Vec<BuildError>) -> Self {
        Self { errors }
    }
}

fn first_error(errors: &[BuildError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}
