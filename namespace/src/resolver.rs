//! Namespace dependency resolution.
//!
//! The resolver is total with respect to cycles: namespaces caught in a cycle
//! are placed after everything that could be ordered, in configured order, and
//! the cycle itself is left for a validator to report.

use crate::{ConfigResult, ConfigurationError, ProjectConfiguration};
use metaed_core::NamespaceId;
use metaed_model::{EntityGraph, NamespaceInfo};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info, warn};

/// A namespace with its dependency closure, ready to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNamespace {
    pub info: NamespaceInfo,
    /// Transitive dependencies, nearest first. Never contains the namespace itself.
    pub dependencies: Vec<String>,
}

impl ResolvedNamespace {
    /// The namespace name.
    pub fn name(&self) -> &str {
        &self.info.namespace_name
    }
}

/// Validate projects and order them so every namespace follows its dependencies.
pub fn resolve_namespaces(
    projects: &[ProjectConfiguration],
) -> ConfigResult<Vec<ResolvedNamespace>> {
    let mut infos = Vec::with_capacity(projects.len());
    for project in projects {
        infos.push(NamespaceInfo {
            namespace_name: project.resolved_namespace_name()?,
            project_name: project.project_name.clone(),
            project_version: project.project_version.clone(),
            project_extension: project.project_extension.clone(),
            is_extension: project.is_extension,
            declared_dependencies: project
                .dependencies
                .iter()
                .map(|d| d.trim().to_string())
                .collect(),
        });
    }

    check_names(&infos)?;
    apply_implicit_core_dependencies(&mut infos);
    check_dependencies(&infos)?;

    let declared: HashMap<&str, &[String]> = infos
        .iter()
        .map(|info| (info.namespace_name.as_str(), info.declared_dependencies.as_slice()))
        .collect();

    let order = dependency_order(&infos);
    let mut resolved = Vec::with_capacity(infos.len());
    for index in order {
        let info = &infos[index];
        let dependencies = dependency_closure(&info.namespace_name, &declared);
        debug!(
            namespace = %info.namespace_name,
            dependencies = ?dependencies,
            "resolved namespace dependencies"
        );
        resolved.push(ResolvedNamespace {
            info: info.clone(),
            dependencies,
        });
    }

    info!(namespaces = resolved.len(), "resolved namespace dependency order");
    Ok(resolved)
}

/// Resolve projects and install the namespaces into an empty graph.
pub fn initialize_namespaces(
    graph: &mut EntityGraph,
    projects: &[ProjectConfiguration],
) -> ConfigResult<Vec<NamespaceId>> {
    let resolved = resolve_namespaces(projects)?;

    let mut ids = Vec::with_capacity(resolved.len());
    for namespace in &resolved {
        ids.push(graph.add_namespace(namespace.info.clone())?);
    }

    for (id, namespace) in ids.iter().zip(&resolved) {
        let dependencies = namespace
            .dependencies
            .iter()
            .filter_map(|name| graph.namespace_by_name(name).map(|ns| ns.id))
            .collect();
        graph.set_dependencies(*id, dependencies)?;
    }
    Ok(ids)
}

fn check_names(infos: &[NamespaceInfo]) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for info in infos {
        if !seen.insert(info.namespace_name.as_str()) {
            return Err(ConfigurationError::DuplicateNamespace(
                info.namespace_name.clone(),
            ));
        }
    }

    for (i, first) in infos.iter().enumerate() {
        for second in &infos[i + 1..] {
            if first.namespace_name != second.namespace_name
                && first.namespace_name.to_lowercase() == second.namespace_name.to_lowercase()
            {
                return Err(ConfigurationError::case_only_difference(
                    &first.namespace_name,
                    &second.namespace_name,
                ));
            }
        }
    }
    Ok(())
}

/// An extension that names no dependencies extends every core namespace.
fn apply_implicit_core_dependencies(infos: &mut [NamespaceInfo]) {
    let core: Vec<String> = infos
        .iter()
        .filter(|info| !info.is_extension)
        .map(|info| info.namespace_name.clone())
        .collect();
    for info in infos.iter_mut() {
        if info.is_extension && info.declared_dependencies.is_empty() {
            info.declared_dependencies = core.clone();
        }
    }
}

fn check_dependencies(infos: &[NamespaceInfo]) -> ConfigResult<()> {
    let by_name: HashMap<&str, &NamespaceInfo> = infos
        .iter()
        .map(|info| (info.namespace_name.as_str(), info))
        .collect();

    for info in infos {
        for dependency in &info.declared_dependencies {
            let target = by_name.get(dependency.as_str()).ok_or_else(|| {
                ConfigurationError::unknown_dependency(&info.namespace_name, dependency)
            })?;
            if !info.is_extension && target.is_extension {
                return Err(ConfigurationError::core_depends_on_extension(
                    &info.namespace_name,
                    dependency,
                ));
            }
        }
    }
    Ok(())
}

/// Kahn's algorithm over declared edges; ties keep configured order.
fn dependency_order(infos: &[NamespaceInfo]) -> Vec<usize> {
    let mut placed = vec![false; infos.len()];
    let mut placed_names: HashSet<&str> = HashSet::new();
    let mut order = Vec::with_capacity(infos.len());

    loop {
        let ready = infos.iter().enumerate().find(|(index, info)| {
            !placed[*index]
                && info
                    .declared_dependencies
                    .iter()
                    .filter(|d| **d != info.namespace_name)
                    .all(|d| placed_names.contains(d.as_str()))
        });
        match ready {
            Some((index, info)) => {
                placed[index] = true;
                placed_names.insert(info.namespace_name.as_str());
                order.push(index);
            }
            None => break,
        }
    }

    for (index, info) in infos.iter().enumerate() {
        if !placed[index] {
            warn!(
                namespace = %info.namespace_name,
                "namespace is part of a dependency cycle; keeping configured order"
            );
            order.push(index);
        }
    }
    order
}

/// Breadth-first closure of declared dependencies, in declared order.
fn dependency_closure(name: &str, declared: &HashMap<&str, &[String]>) -> Vec<String> {
    let mut closure: Vec<String> = Vec::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(name);

    while let Some(current) = queue.pop_front() {
        for dependency in declared.get(current).copied().unwrap_or(&[]) {
            if dependency == name || closure.iter().any(|seen| seen == dependency) {
                continue;
            }
            closure.push(dependency.clone());
            queue.push_back(dependency.as_str());
        }
    }
    closure
}
