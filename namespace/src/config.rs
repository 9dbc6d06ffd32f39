//! Project configuration.

use crate::{ConfigResult, ConfigurationError};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Result<Regex, regex_lite::Error>> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]"));

/// One MetaEd project as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    pub project_name: String,
    /// Namespace name; derived from the project name when absent.
    #[serde(default)]
    pub namespace_name: Option<String>,
    #[serde(default)]
    pub project_extension: String,
    pub project_version: String,
    #[serde(default)]
    pub is_extension: bool,
    /// Namespace names this project may reference.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ProjectConfiguration {
    /// A core data standard project.
    pub fn core(project_name: impl Into<String>, project_version: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            namespace_name: None,
            project_extension: String::new(),
            project_version: project_version.into(),
            is_extension: false,
            dependencies: Vec::new(),
        }
    }

    /// An extension project.
    pub fn extension(
        project_name: impl Into<String>,
        project_extension: impl Into<String>,
        project_version: impl Into<String>,
    ) -> Self {
        Self {
            project_extension: project_extension.into(),
            is_extension: true,
            ..Self::core(project_name, project_version)
        }
    }

    /// Set an explicit namespace name.
    pub fn namespace(mut self, namespace_name: impl Into<String>) -> Self {
        self.namespace_name = Some(namespace_name.into());
        self
    }

    /// Add a declared dependency.
    pub fn depends_on(mut self, namespace_name: impl Into<String>) -> Self {
        self.dependencies.push(namespace_name.into());
        self
    }

    /// The namespace name, deriving it from the project name if needed.
    ///
    /// A derived name keeps only ASCII letters and digits: `Ed-Fi` becomes `EdFi`.
    pub fn resolved_namespace_name(&self) -> ConfigResult<String> {
        let name = match &self.namespace_name {
            Some(name) => name.trim().to_string(),
            None => {
                let strip = NON_ALPHANUMERIC.as_ref().map_err(|e| e.clone())?;
                strip.replace_all(&self.project_name, "").into_owned()
            }
        };
        if name.is_empty() {
            return Err(ConfigurationError::EmptyNamespaceName(
                self.project_name.clone(),
            ));
        }
        Ok(name)
    }
}
