//! Graph snapshots for caching a built model.
//!
//! A snapshot holds the namespaces, entities, properties and data standard
//! version. Plugin state, failures and enhancer results are not included; the
//! property index is rebuilt on load.

use crate::{EntityGraph, MetaEdEnvironment};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Serializable form of a built graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    pub data_standard_version: Version,
    pub graph: EntityGraph,
}

impl GraphSnapshot {
    /// Capture the graph of an environment.
    pub fn capture(env: &MetaEdEnvironment) -> Self {
        Self {
            data_standard_version: env.data_standard_version.clone(),
            graph: env.graph.clone(),
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from JSON, rebuilding the property index.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut snapshot: GraphSnapshot = serde_json::from_str(json)?;
        snapshot.graph.reindex();
        Ok(snapshot)
    }

    /// Turn the snapshot back into an environment with no plugin state.
    pub fn into_environment(self) -> MetaEdEnvironment {
        MetaEdEnvironment::restore(self.graph, self.data_standard_version)
    }
}
