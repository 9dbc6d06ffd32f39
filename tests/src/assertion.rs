//! Expectations over a run report.

use crate::error::{ScenarioError, ScenarioResult};
use metaed_pipeline::RunReport;

/// What a scenario expects the run to report.
#[derive(Default)]
pub struct Expectation {
    pub errors: Option<usize>,
    pub warnings: Option<usize>,
    pub exit_code: Option<i32>,
    /// (validator name, failure count)
    pub validator_failures: Vec<(String, usize)>,
    /// Every listed fragment must appear in at least one failure message.
    pub messages_containing: Vec<String>,
    pub message_pattern: Option<String>,
    pub failed_enhancers: Option<usize>,
    pub output_files: Vec<String>,

    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&RunReport) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expectation")
            .field("errors", &self.errors)
            .field("warnings", &self.warnings)
            .field("exit_code", &self.exit_code)
            .field("validator_failures", &self.validator_failures)
            .field("messages_containing", &self.messages_containing)
            .field("message_pattern", &self.message_pattern)
            .field("failed_enhancers", &self.failed_enhancers)
            .field("output_files", &self.output_files)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect exactly this many error failures.
    pub fn errors(mut self, count: usize) -> Self {
        self.errors = Some(count);
        self
    }

    /// Expect no failures of either category.
    pub fn clean(self) -> Self {
        self.errors(0).warnings(0)
    }

    pub fn warnings(mut self, count: usize) -> Self {
        self.warnings = Some(count);
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Expect a validator to report exactly this many failures.
    pub fn from_validator(mut self, validator: impl Into<String>, count: usize) -> Self {
        self.validator_failures.push((validator.into(), count));
        self
    }

    pub fn message_containing(mut self, fragment: impl Into<String>) -> Self {
        self.messages_containing.push(fragment.into());
        self
    }

    pub fn message_matching(mut self, pattern: impl Into<String>) -> Self {
        self.message_pattern = Some(pattern.into());
        self
    }

    pub fn failed_enhancers(mut self, count: usize) -> Self {
        self.failed_enhancers = Some(count);
        self
    }

    /// Expect some generator to have produced a file of this name.
    pub fn output_file(mut self, file_name: impl Into<String>) -> Self {
        self.output_files.push(file_name.into());
        self
    }

    pub fn custom(mut self, check: impl Fn(&RunReport) -> bool + Send + Sync + 'static) -> Self {
        self.custom = Some(Box::new(check));
        self
    }

    /// Check a report against every expectation set.
    pub fn verify(&self, scenario: &str, report: &RunReport) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(scenario, message));

        if let Some(expected) = self.errors {
            if report.error_count() != expected {
                return fail(format!(
                    "expected {} error(s), got {}:\n{}",
                    expected,
                    report.error_count(),
                    report
                ));
            }
        }

        if let Some(expected) = self.warnings {
            if report.warning_count() != expected {
                return fail(format!(
                    "expected {} warning(s), got {}:\n{}",
                    expected,
                    report.warning_count(),
                    report
                ));
            }
        }

        if let Some(expected) = self.exit_code {
            if report.exit_code() != expected {
                return fail(format!("expected exit code {}, got {}", expected, report.exit_code()));
            }
        }

        for (validator, expected) in &self.validator_failures {
            let actual = report.validation_failures.from_validator(validator).count();
            if actual != *expected {
                return fail(format!(
                    "expected {} failure(s) from {}, got {}",
                    expected, validator, actual
                ));
            }
        }

        for fragment in &self.messages_containing {
            let found = report
                .validation_failures
                .all()
                .iter()
                .any(|failure| failure.message.contains(fragment.as_str()));
            if !found {
                return fail(format!("no failure message contains '{}':\n{}", fragment, report));
            }
        }

        if let Some(ref pattern) = self.message_pattern {
            let re = regex_lite::Regex::new(pattern)
                .map_err(|e| ScenarioError::invalid_pattern(scenario, pattern, e.to_string()))?;
            let found = report
                .validation_failures
                .all()
                .iter()
                .any(|failure| re.is_match(&failure.message));
            if !found {
                return fail(format!("no failure message matches /{}/:\n{}", pattern, report));
            }
        }

        if let Some(expected) = self.failed_enhancers {
            if report.failed_enhancer_count != expected {
                return fail(format!(
                    "expected {} failed enhancer(s), got {}",
                    expected, report.failed_enhancer_count
                ));
            }
        }

        for file_name in &self.output_files {
            let found = report
                .generator_results
                .iter()
                .flat_map(|result| &result.generated_output)
                .any(|output| output.file_name == *file_name);
            if !found {
                return fail(format!("no generator produced {}", file_name));
            }
        }

        if let Some(ref check) = self.custom {
            if !check(report) {
                return fail("custom check failed".to_string());
            }
        }

        Ok(())
    }
}
