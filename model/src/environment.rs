//! The root aggregate of one compilation run.

use crate::EntityGraph;
use metaed_core::{EnhancerResult, EntityId, ValidationFailures};
use semver::Version;
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

/// Per-plugin record on the environment.
pub struct PluginEnvironment {
    pub short_name: String,
    /// Concrete version of the technology the plugin targets.
    pub target_technology_version: Version,
    /// Plugin-wide configuration data.
    pub config: Value,
    /// Per-entity configuration data.
    pub entity_config: BTreeMap<EntityId, Value>,
    pub(crate) state: Option<Box<dyn Any + Send + Sync>>,
}

impl PluginEnvironment {
    /// Create a record targeting version 0.0.0 with empty configuration.
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            target_technology_version: Version::new(0, 0, 0),
            config: Value::Object(Default::default()),
            entity_config: BTreeMap::new(),
            state: None,
        }
    }

    /// Set the target technology version.
    pub fn targeting(mut self, version: Version) -> Self {
        self.target_technology_version = version;
        self
    }
}

impl fmt::Debug for PluginEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginEnvironment")
            .field("short_name", &self.short_name)
            .field("target_technology_version", &self.target_technology_version)
            .field("config", &self.config)
            .field("entity_config", &self.entity_config)
            .field("state", &self.state.as_ref().map(|_| "<state>"))
            .finish()
    }
}

/// Everything one compilation run knows.
#[derive(Debug)]
pub struct MetaEdEnvironment {
    pub graph: EntityGraph,
    /// Plugin records keyed by short name.
    pub plugin: BTreeMap<String, PluginEnvironment>,
    /// Version of the modeling language in force.
    pub data_standard_version: Version,
    pub validation_failures: ValidationFailures,
    pub enhancer_results: Vec<EnhancerResult>,
    build_complete: bool,
}

impl Default for MetaEdEnvironment {
    fn default() -> Self {
        Self::new(Version::new(0, 0, 0))
    }
}

impl MetaEdEnvironment {
    /// Create an empty environment for a data standard version.
    pub fn new(data_standard_version: Version) -> Self {
        Self {
            graph: EntityGraph::new(),
            plugin: BTreeMap::new(),
            data_standard_version,
            validation_failures: ValidationFailures::new(),
            enhancer_results: Vec::new(),
            build_complete: false,
        }
    }

    /// Register a plugin record, keeping an existing one.
    pub fn register_plugin(&mut self, short_name: &str) -> &mut PluginEnvironment {
        self.plugin
            .entry(short_name.to_string())
            .or_insert_with(|| PluginEnvironment::new(short_name))
    }

    /// Get a plugin record by short name.
    pub fn plugin_environment(&self, short_name: &str) -> Option<&PluginEnvironment> {
        self.plugin.get(short_name)
    }

    /// Get a plugin record by short name for changes.
    pub fn plugin_environment_mut(&mut self, short_name: &str) -> Option<&mut PluginEnvironment> {
        self.plugin.get_mut(short_name)
    }

    /// Seal the graph and record that symbol building finished.
    pub fn mark_build_complete(&mut self) {
        self.graph.seal();
        self.build_complete = true;
    }

    /// Check if symbol building finished.
    pub fn is_build_complete(&self) -> bool {
        self.build_complete
    }

    /// Check if there is a built graph for transformation passes to run over.
    pub fn has_built_graph(&self) -> bool {
        self.build_complete && self.graph.namespace_count() > 0
    }

    pub(crate) fn restore(graph: EntityGraph, data_standard_version: Version) -> Self {
        let build_complete = graph.is_sealed();
        Self {
            graph,
            build_complete,
            ..Self::new(data_standard_version)
        }
    }
}
