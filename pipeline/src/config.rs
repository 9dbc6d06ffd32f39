//! Run configuration.

use crate::PipelineResult;
use metaed_model::ModelType;
use metaed_namespace::ProjectConfiguration;
use metaed_version::parse_version;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Either a single value or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The values as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}

/// Which entities a config rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMatch {
    pub entity: OneOrMany<ModelType>,
    /// Restrict to core namespaces.
    #[serde(default)]
    pub core: bool,
    /// Restrict to extension namespaces.
    #[serde(default)]
    pub extensions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<OneOrMany<String>>,
}

impl ConfigMatch {
    /// Match every entity of a kind in every namespace.
    pub fn entity(model_type: ModelType) -> Self {
        Self {
            entity: OneOrMany::One(model_type),
            core: false,
            extensions: false,
            namespace: None,
            entity_name: None,
        }
    }

    /// Restrict to core namespaces.
    pub fn core(mut self) -> Self {
        self.core = true;
        self
    }

    /// Restrict to extension namespaces.
    pub fn extensions(mut self) -> Self {
        self.extensions = true;
        self
    }

    /// Restrict to one namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(OneOrMany::One(namespace.into()));
        self
    }

    /// Restrict to one entity name.
    pub fn named(mut self, entity_name: impl Into<String>) -> Self {
        self.entity_name = Some(OneOrMany::One(entity_name.into()));
        self
    }
}

/// One configuration rule for a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRule {
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<OneOrMany<ConfigMatch>>,
    pub data: Value,
}

impl ConfigRule {
    /// A rule applying its data plugin-wide.
    pub fn new(rule: impl Into<String>, data: Value) -> Self {
        Self {
            rule: rule.into(),
            matches: None,
            data,
        }
    }

    /// Apply the data to matching entities instead.
    pub fn matching(mut self, matches: ConfigMatch) -> Self {
        self.matches = Some(match self.matches.take() {
            None => OneOrMany::One(matches),
            Some(OneOrMany::One(first)) => OneOrMany::Many(vec![first, matches]),
            Some(OneOrMany::Many(mut all)) => {
                all.push(matches);
                OneOrMany::Many(all)
            }
        });
        self
    }
}

/// Configuration of one plugin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub rules: Vec<ConfigRule>,
}

/// Everything a run is configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaEdConfiguration {
    pub projects: Vec<ProjectConfiguration>,
    /// Data standard version; the core project's version when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_standard_version: Option<String>,
    /// Target technology version per plugin short name.
    #[serde(default)]
    pub plugin_tech_version: BTreeMap<String, String>,
    #[serde(default)]
    pub plugin_config: BTreeMap<String, PluginConfig>,
}

impl MetaEdConfiguration {
    /// Configure a run over projects.
    pub fn new(projects: Vec<ProjectConfiguration>) -> Self {
        Self {
            projects,
            ..Self::default()
        }
    }

    /// Read a configuration from JSON.
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the data standard version.
    pub fn data_standard(mut self, version: impl Into<String>) -> Self {
        self.data_standard_version = Some(version.into());
        self
    }

    /// Set a plugin's target technology version.
    pub fn plugin_version(
        mut self,
        short_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.plugin_tech_version.insert(short_name.into(), version.into());
        self
    }

    /// Add a config rule for a plugin.
    pub fn rule(mut self, short_name: impl Into<String>, rule: ConfigRule) -> Self {
        self.plugin_config.entry(short_name.into()).or_default().rules.push(rule);
        self
    }

    /// The data standard version in force.
    ///
    /// Falls back to the first core project's version, then to 0.0.0.
    pub fn resolved_data_standard_version(&self) -> PipelineResult<Version> {
        let configured = self.data_standard_version.as_deref().or_else(|| {
            self.projects
                .iter()
                .find(|project| !project.is_extension)
                .map(|project| project.project_version.as_str())
        });
        match configured {
            Some(text) => Ok(parse_version(text)?),
            None => Ok(Version::new(0, 0, 0)),
        }
    }

    /// The configured target version of a plugin, if any.
    pub fn plugin_target_version(&self, short_name: &str) -> PipelineResult<Option<Version>> {
        self.plugin_tech_version
            .get(short_name)
            .map(|text| parse_version(text))
            .transpose()
            .map_err(Into::into)
    }
}
