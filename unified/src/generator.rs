//! Plain-text summary of the built model.

use metaed_model::{EntityGraph, MetaEdEnvironment, Namespace, Property};
use metaed_pipeline::{GeneratedOutput, GeneratorResult};
use std::fmt::Write;

pub const MODEL_SUMMARY_GENERATOR: &str = "ModelSummaryGenerator";

/// One summary file per namespace, in dependency order.
///
/// Output depends only on the graph, so a reloaded snapshot yields the same bytes.
pub fn model_summary_generator(env: &MetaEdEnvironment) -> GeneratorResult {
    env.graph
        .namespaces()
        .fold(GeneratorResult::new(MODEL_SUMMARY_GENERATOR), |result, namespace| {
            result.with_output(GeneratedOutput::text(
                "Model Summary",
                namespace.name(),
                "Summary",
                format!("{}-Summary.txt", namespace.name()),
                summarize_namespace(&env.graph, namespace),
            ))
        })
}

fn summarize_namespace(graph: &EntityGraph, namespace: &Namespace) -> String {
    let mut out = String::new();
    let kind = if namespace.is_extension() { "extension" } else { "core" };
    let _ = writeln!(out, "Namespace {} ({})", namespace.name(), kind);

    let dependencies: Vec<&str> = namespace
        .dependencies()
        .iter()
        .map(|id| graph.namespace_name(*id))
        .collect();
    if !dependencies.is_empty() {
        let _ = writeln!(out, "Depends on: {}", dependencies.join(", "));
    }

    for entity in namespace.all_entities().filter_map(|id| graph.entity(id)) {
        let _ = write!(out, "{} {}", entity.model_type().display_name(), entity.meta_ed_name());
        if let Some(base) = entity.base() {
            let target = base
                .entity
                .and_then(|id| graph.entity(id))
                .map(|base| qualified(graph, base.namespace(), base.meta_ed_name()))
                .unwrap_or_else(|| "unresolved".to_string());
            let _ = write!(out, " -> {}", target);
        }
        let _ = writeln!(out);
        for property in graph.properties_of(entity.id) {
            let _ = writeln!(out, "  {}", describe_property(graph, property));
        }
    }
    out
}

fn describe_property(graph: &EntityGraph, property: &Property) -> String {
    let mut line = format!("{} {}", property.property_type(), property.full_property_name);
    if property.is_part_of_identity {
        line.push_str(" [identity]");
    }
    if let Some(reference) = property.reference() {
        let target = reference
            .referenced_entity
            .and_then(|id| graph.entity(id))
            .map(|entity| qualified(graph, entity.namespace(), entity.meta_ed_name()))
            .unwrap_or_else(|| "unresolved".to_string());
        let _ = write!(line, " -> {}", target);
    }
    line
}

fn qualified(graph: &EntityGraph, namespace: metaed_core::NamespaceId, name: &str) -> String {
    format!("{}.{}", graph.namespace_name(namespace), name)
}
