//! End-of-run report.

use crate::GeneratorResult;
use metaed_core::{EnhancerResult, ValidationFailures};
use std::fmt;

/// What a pipeline run produced.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub validation_failures: ValidationFailures,
    pub enhancer_results: Vec<EnhancerResult>,
    pub failed_enhancer_count: usize,
    pub generator_results: Vec<GeneratorResult>,
}

impl RunReport {
    /// Number of error-category failures.
    pub fn error_count(&self) -> usize {
        self.validation_failures.error_count()
    }

    /// Number of warning-category failures.
    pub fn warning_count(&self) -> usize {
        self.validation_failures.warning_count()
    }

    /// Process exit code: 1 when any error was reported.
    pub fn exit_code(&self) -> i32 {
        if self.error_count() > 0 {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.validation_failures {
            writeln!(f, "{}", failure)?;
        }
        write!(
            f,
            "{} error(s), {} warning(s), {} failed enhancer(s)",
            self.error_count(),
            self.warning_count(),
            self.failed_enhancer_count
        )
    }
}
