//! Annotating the model with plugin configuration.

use crate::{ConfigMatch, ConfigRule, MetaEdConfiguration};
use metaed_core::{EntityId, ValidationFailure};
use metaed_model::{EntityGraph, MetaEdEnvironment, Namespace};
use serde_json::map::Entry;
use serde_json::Value;
use tracing::{debug, warn};

const ANNOTATOR_NAME: &str = "AnnotateModelWithConfiguration";

/// Apply every plugin's config rules to the environment.
///
/// Rules without matches merge their data into the plugin-wide config; rules
/// with matches merge it into each matched entity's config. A match naming a
/// missing namespace or entity is reported and skipped. Returns the number of
/// failures reported.
pub fn annotate_model_with_configuration(
    env: &mut MetaEdEnvironment,
    configuration: &MetaEdConfiguration,
) -> usize {
    let mut failures = Vec::new();

    for (short_name, plugin_config) in &configuration.plugin_config {
        if env.plugin_environment(short_name).is_none() {
            warn!(plugin = %short_name, "configuration for unregistered plugin ignored");
            continue;
        }
        for rule in &plugin_config.rules {
            let Some(matches) = &rule.matches else {
                if let Some(plugin) = env.plugin_environment_mut(short_name) {
                    deep_merge(&mut plugin.config, &rule.data);
                }
                continue;
            };

            let mut targets = Vec::new();
            for config_match in matches.as_slice() {
                targets.extend(matched_entities(&env.graph, rule, config_match, &mut failures));
            }
            debug!(
                plugin = %short_name,
                rule = %rule.rule,
                entities = targets.len(),
                "applying config rule"
            );

            if let Some(plugin) = env.plugin_environment_mut(short_name) {
                for entity in targets {
                    let slot = plugin
                        .entity_config
                        .entry(entity)
                        .or_insert_with(|| Value::Object(Default::default()));
                    deep_merge(slot, &rule.data);
                }
            }
        }
    }

    let count = failures.len();
    env.validation_failures.extend(failures);
    count
}

fn matched_entities(
    graph: &EntityGraph,
    rule: &ConfigRule,
    config_match: &ConfigMatch,
    failures: &mut Vec<ValidationFailure>,
) -> Vec<EntityId> {
    let namespaces: Vec<&Namespace> = match &config_match.namespace {
        Some(names) => names
            .as_slice()
            .iter()
            .filter_map(|name| {
                let found = graph.namespace_by_name(name);
                if found.is_none() {
                    failures.push(ValidationFailure::error(
                        ANNOTATOR_NAME,
                        format!(
                            "Config rule '{}' names namespace '{}', which does not exist.",
                            rule.rule, name
                        ),
                    ));
                }
                found
            })
            .collect(),
        None => graph
            .namespaces()
            .filter(|ns| {
                (!config_match.core && !config_match.extensions)
                    || (config_match.core && !ns.is_extension())
                    || (config_match.extensions && ns.is_extension())
            })
            .collect(),
    };

    let kinds = config_match.entity.as_slice();
    match &config_match.entity_name {
        None => namespaces
            .iter()
            .flat_map(|ns| kinds.iter().flat_map(move |kind| ns.entities_of(*kind).iter().copied()))
            .collect(),
        Some(names) => {
            let mut found = Vec::new();
            for name in names.as_slice() {
                let before = found.len();
                for ns in &namespaces {
                    found.extend(kinds.iter().filter_map(|kind| ns.entity(*kind, name)));
                }
                if found.len() == before {
                    failures.push(ValidationFailure::error(
                        ANNOTATOR_NAME,
                        format!(
                            "Config rule '{}' names entity '{}', which does not match any entity of type {}.",
                            rule.rule,
                            name,
                            kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
                        ),
                    ));
                }
            }
            found
        }
    }
}

/// Merge `source` into `target`: objects merge by key, arrays concatenate,
/// anything else is replaced.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.entry(key.clone()) {
                    Entry::Occupied(mut existing) => deep_merge(existing.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => target.extend(source.iter().cloned()),
        (target, source) => *target = source.clone(),
    }
}
