//! Namespaces and their per-kind entity repositories.

use crate::ModelType;
use metaed_core::{EntityId, NamespaceId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Project-level description of a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfo {
    pub namespace_name: String,
    pub project_name: String,
    pub project_version: String,
    pub project_extension: String,
    pub is_extension: bool,
    /// Dependency names as configured, before closure.
    pub declared_dependencies: Vec<String>,
}

impl NamespaceInfo {
    /// Create a core namespace description.
    pub fn new(namespace_name: impl Into<String>) -> Self {
        let namespace_name = namespace_name.into();
        Self {
            project_name: namespace_name.clone(),
            namespace_name,
            project_version: String::from("0.0.0"),
            ..Self::default()
        }
    }

    /// Mark as an extension with the given project extension tag.
    pub fn extension(mut self, project_extension: impl Into<String>) -> Self {
        self.is_extension = true;
        self.project_extension = project_extension.into();
        self
    }

    /// Add a declared dependency.
    pub fn depends_on(mut self, namespace_name: impl Into<String>) -> Self {
        self.declared_dependencies.push(namespace_name.into());
        self
    }
}

/// Entities of one kind in one namespace, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityRepository {
    order: Vec<EntityId>,
    by_name: HashMap<String, EntityId>,
}

impl EntityRepository {
    /// Look up an entity by name.
    pub fn get(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    /// Entities in declaration order.
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Check if the name is taken.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn insert(&mut self, name: &str, id: EntityId) -> bool {
        if self.by_name.contains_key(name) {
            return false;
        }
        self.by_name.insert(name.to_string(), id);
        self.order.push(id);
        true
    }
}

/// One MetaEd project and the entities it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub id: NamespaceId,
    pub info: NamespaceInfo,
    pub(crate) dependencies: Vec<NamespaceId>,
    pub(crate) entities: BTreeMap<ModelType, EntityRepository>,
}

impl Namespace {
    pub(crate) fn new(id: NamespaceId, info: NamespaceInfo) -> Self {
        Self {
            id,
            info,
            dependencies: Vec::new(),
            entities: BTreeMap::new(),
        }
    }

    /// The namespace name.
    pub fn name(&self) -> &str {
        &self.info.namespace_name
    }

    /// Check if this namespace extends a core namespace.
    pub fn is_extension(&self) -> bool {
        self.info.is_extension
    }

    /// Namespaces this one may reference, in search order. Never contains self.
    pub fn dependencies(&self) -> &[NamespaceId] {
        &self.dependencies
    }

    /// Look up an entity of one kind by name.
    pub fn entity(&self, model_type: ModelType, name: &str) -> Option<EntityId> {
        self.entities.get(&model_type).and_then(|repo| repo.get(name))
    }

    /// Entities of one kind, in declaration order.
    pub fn entities_of(&self, model_type: ModelType) -> &[EntityId] {
        self.entities
            .get(&model_type)
            .map(|repo| repo.ids())
            .unwrap_or(&[])
    }

    /// Every entity, grouped by kind in kind order.
    pub fn all_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.values().flat_map(|repo| repo.ids().iter().copied())
    }

    /// Number of entities declared in this namespace.
    pub fn entity_count(&self) -> usize {
        self.entities.values().map(|repo| repo.ids().len()).sum()
    }
}
