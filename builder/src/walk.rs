//! Walking the parse tree into the entity graph.

use crate::{
    default_builders, property_def, DeclarationBuilder, DeclarationNode, ParseTree, WalkError,
};
use metaed_core::{
    EntityId, FileMap, NamespaceId, SourceField, SourceMap, ValidationFailure, ValidationFailures,
};
use metaed_model::{BuildError, BuildResult, EntityGraph, MetaEdEnvironment};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const BUILDER_NAME: &str = "TopLevelEntityBuilder";

/// Build every namespace of the tree with the standard builders.
pub fn walk_builders(env: &mut MetaEdEnvironment, tree: &ParseTree) -> Result<(), WalkError> {
    walk_builders_with(env, tree, &default_builders())
}

/// Build every namespace of the tree, in dependency order.
///
/// A build error stops the rest of its namespace; other namespaces are still
/// built so their diagnostics are reported. The graph is sealed only when every
/// namespace built cleanly.
pub fn walk_builders_with(
    env: &mut MetaEdEnvironment,
    tree: &ParseTree,
    builders: &[Box<dyn DeclarationBuilder>],
) -> Result<(), WalkError> {
    let mut errors = Vec::new();

    for node in &tree.namespaces {
        if env.graph.namespace_by_name(&node.namespace_name).is_none() {
            errors.push(BuildError::unknown_namespace(&node.namespace_name));
        }
    }

    let order: Vec<(NamespaceId, String)> = env
        .graph
        .namespaces()
        .map(|ns| (ns.id, ns.name().to_string()))
        .collect();

    for (namespace, namespace_name) in order {
        let declarations = tree
            .namespaces
            .iter()
            .filter(|node| node.namespace_name == namespace_name)
            .flat_map(|node| node.declarations.iter());

        let mut built = 0usize;
        for declaration in declarations {
            let handler = builders
                .iter()
                .find(|b| b.handles().contains(&declaration.kind));
            let Some(builder) = handler else {
                warn!(
                    kind = %declaration.kind,
                    name = %declaration.name.text,
                    "no builder for declaration"
                );
                continue;
            };
            match build_declaration(
                &mut env.graph,
                &mut env.validation_failures,
                namespace,
                &namespace_name,
                declaration,
                builder.as_ref(),
            ) {
                Ok(_) => built += 1,
                Err(error) => {
                    warn!(namespace = %namespace_name, error = %error, "namespace build stopped");
                    errors.push(error);
                    break;
                }
            }
        }
        info!(namespace = %namespace_name, entities = built, "built namespace");
    }

    if errors.is_empty() {
        env.mark_build_complete();
        Ok(())
    } else {
        Err(WalkError::new(errors))
    }
}

/// Build one declaration and its properties.
pub fn build_declaration(
    graph: &mut EntityGraph,
    failures: &mut ValidationFailures,
    namespace: NamespaceId,
    namespace_name: &str,
    node: &DeclarationNode,
    builder: &dyn DeclarationBuilder,
) -> BuildResult<EntityId> {
    let kind = builder.entity_kind(node, namespace_name);
    let file_map = node
        .file
        .as_ref()
        .map(|file| FileMap::new(file.clone(), node.name.line));

    let mut entity = graph
        .add_entity(namespace, node.name.text.clone(), kind)
        .source(SourceField::MetaEdName, node.name.source_map())
        .file(file_map.clone());
    if let Some(keyword) = &node.keyword {
        entity = entity.source(SourceField::Type, keyword.source_map());
    }
    if let Some(documentation) = &node.documentation {
        entity = entity
            .documentation(documentation.text.clone())
            .source(SourceField::Documentation, documentation.source_map());
    }
    if let Some(base) = &node.base {
        entity = entity.source(SourceField::BaseEntityName, base.name.source_map());
        if let Some(namespace) = &base.namespace {
            entity = entity.source(SourceField::BaseEntityNamespaceName, namespace.source_map());
        }
    }
    if let Some(reason) = &node.deprecation_reason {
        entity = entity.deprecated(reason.clone());
    }

    let id = match entity.done() {
        Ok(id) => id,
        Err(error) => {
            if matches!(error, BuildError::DuplicateEntity { .. }) {
                report_duplicate_entity(graph, failures, namespace, node, file_map);
            }
            return Err(error);
        }
    };

    let mut seen: HashMap<String, (Option<SourceMap>, bool)> = HashMap::new();
    for property_node in &node.properties {
        let def = property_def(property_node, namespace_name);
        let full_name = def.full_property_name();
        let location = def.source_map.primary().cloned();

        if let Some((first_location, reported)) = seen.get_mut(&full_name) {
            if !*reported {
                failures.push(duplicate_property(&full_name, first_location.as_ref(), &file_map));
                *reported = true;
            }
            failures.push(duplicate_property(&full_name, location.as_ref(), &file_map));
            continue;
        }
        seen.insert(full_name, (location, false));
        graph.add_property(id, def)?;
    }

    debug!(
        builder = builder.name(),
        entity = %node.name.text,
        properties = node.properties.len(),
        "built entity"
    );
    Ok(id)
}

fn report_duplicate_entity(
    graph: &EntityGraph,
    failures: &mut ValidationFailures,
    namespace: NamespaceId,
    node: &DeclarationNode,
    file_map: Option<FileMap>,
) {
    let message = format!(
        "{} named {} is a duplicate declaration of that name.",
        node.kind.display_name(),
        node.name.text
    );
    let existing = graph
        .namespace(namespace)
        .and_then(|ns| ns.entity(node.kind, &node.name.text))
        .and_then(|id| graph.entity(id));
    if let Some(existing) = existing {
        failures.push(
            ValidationFailure::error(BUILDER_NAME, message.clone())
                .with_source(existing.source_map.primary())
                .with_file(existing.file_map.clone()),
        );
    }
    failures.push(
        ValidationFailure::error(BUILDER_NAME, message)
            .with_source(Some(&node.name.source_map()))
            .with_file(file_map),
    );
}

fn duplicate_property(
    full_name: &str,
    location: Option<&SourceMap>,
    file_map: &Option<FileMap>,
) -> ValidationFailure {
    ValidationFailure::error(
        BUILDER_NAME,
        format!(
            "Property named {} is a duplicate declaration of that name. Use 'role name' keyword to avoid naming collisions.",
            full_name
        ),
    )
    .with_source(location)
    .with_file(file_map.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NameNode, NamespaceNode, PropertyNode, Token};
    use metaed_model::{ModelType, NamespaceInfo, PropertyType, ReferenceType, SimpleType};
    use pretty_assertions::assert_eq;

    fn environment(namespaces: &[&str]) -> MetaEdEnvironment {
        let mut env = MetaEdEnvironment::default();
        let mut ids = Vec::new();
        for (index, name) in namespaces.iter().enumerate() {
            let info = if index == 0 {
                NamespaceInfo::new(*name)
            } else {
                NamespaceInfo::new(*name).extension(*name)
            };
            ids.push(env.graph.add_namespace(info).unwrap());
        }
        for id in ids.iter().skip(1) {
            env.graph.set_dependencies(*id, vec![ids[0]]).unwrap();
        }
        env
    }

    fn student(name: &str) -> DeclarationNode {
        DeclarationNode::new(ModelType::DomainEntity, Token::new(name, 1, 14))
            .keyword(Token::new("Domain Entity", 1, 0))
            .documentation("A student")
            .property(
                PropertyNode::new(
                    PropertyType::Simple(SimpleType::String),
                    Token::new("StudentUniqueId", 3, 11),
                )
                .identity(),
            )
    }

    // ========== TEST: walk_builds_graph ==========
    #[test]
    fn test_walk_builds_entities_and_seals() {
        // GIVEN a tree with one entity in EdFi
        let mut env = environment(&["EdFi"]);
        let tree =
            ParseTree::new().namespace(NamespaceNode::new("EdFi").declare(student("Student")));

        // WHEN walking the builders
        walk_builders(&mut env, &tree).unwrap();

        // THEN the entity exists with its identity property, and the build is complete
        let ns = env.graph.namespace_by_name("EdFi").unwrap();
        let id = ns.entity(ModelType::DomainEntity, "Student").unwrap();
        let entity = env.graph.entity(id).unwrap();
        assert_eq!(entity.identity_properties().len(), 1);
        assert_eq!(entity.source_map.get(SourceField::MetaEdName).map(|m| m.column), Some(14));
        assert!(env.is_build_complete());
    }

    // ========== TEST: duplicate_entity_fatal_for_namespace ==========
    #[test]
    fn test_duplicate_entity_stops_only_its_namespace() {
        // GIVEN a duplicate in EdFi followed by another entity, and a clean Sample
        let mut env = environment(&["EdFi", "Sample"]);
        let tree = ParseTree::new()
            .namespace(
                NamespaceNode::new("EdFi")
                    .declare(student("Student"))
                    .declare(student("Student"))
                    .declare(student("Staff")),
            )
            .namespace(NamespaceNode::new("Sample").declare(student("Applicant")));

        // WHEN walking the builders
        let result = walk_builders(&mut env, &tree);

        // THEN the walk fails with one build error
        let error = result.unwrap_err();
        assert_eq!(error.errors.len(), 1);
        assert!(matches!(error.errors[0], BuildError::DuplicateEntity { .. }));

        // AND the rest of EdFi was skipped while Sample was built
        let edfi = env.graph.namespace_by_name("EdFi").unwrap();
        assert!(edfi.entity(ModelType::DomainEntity, "Staff").is_none());
        let sample = env.graph.namespace_by_name("Sample").unwrap();
        assert!(sample.entity(ModelType::DomainEntity, "Applicant").is_some());

        // AND both declarations are reported, and the build is incomplete
        assert_eq!(env.validation_failures.from_validator(BUILDER_NAME).count(), 2);
        assert!(!env.is_build_complete());
    }

    // ========== TEST: duplicate_property ==========
    #[test]
    fn test_duplicate_property_reports_both_and_keeps_first() {
        // GIVEN an entity declaring the same property twice
        let mut env = environment(&["EdFi"]);
        let declaration = student("Student").property(PropertyNode::new(
            PropertyType::Simple(SimpleType::String),
            Token::new("StudentUniqueId", 4, 11),
        ));
        let tree = ParseTree::new().namespace(NamespaceNode::new("EdFi").declare(declaration));

        // WHEN walking the builders
        walk_builders(&mut env, &tree).unwrap();

        // THEN two failures are reported and only one property is kept
        let failures: Vec<_> = env.validation_failures.from_validator(BUILDER_NAME).collect();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].message.contains("Use 'role name' keyword"));
        assert_eq!(failures[0].source_map.as_ref().map(|m| m.line), Some(3));
        assert_eq!(failures[1].source_map.as_ref().map(|m| m.line), Some(4));
        let id = env
            .graph
            .namespace_by_name("EdFi")
            .unwrap()
            .entity(ModelType::DomainEntity, "Student")
            .unwrap();
        assert_eq!(env.graph.entity(id).unwrap().properties().len(), 1);
    }

    // ========== TEST: role_name_avoids_collision ==========
    #[test]
    fn test_role_name_avoids_property_collision() {
        // GIVEN two references to School, one with a role name
        let mut env = environment(&["EdFi"]);
        let school = PropertyType::Reference(ReferenceType::DomainEntity);
        let declaration = DeclarationNode::new(ModelType::Association, "StudentTransfer")
            .property(PropertyNode::new(school, "School"))
            .property(PropertyNode::new(school, "School").role_name("Receiving"));
        let tree = ParseTree::new().namespace(NamespaceNode::new("EdFi").declare(declaration));

        // WHEN walking the builders
        walk_builders(&mut env, &tree).unwrap();

        // THEN both properties are kept and nothing is reported
        assert!(env.validation_failures.is_empty());
        assert_eq!(env.graph.property_index().of_type(school).len(), 2);
    }

    // ========== TEST: unknown_namespace ==========
    #[test]
    fn test_unconfigured_namespace_is_a_build_error() {
        let mut env = environment(&["EdFi"]);
        let tree =
            ParseTree::new().namespace(NamespaceNode::new("Nowhere").declare(student("Student")));
        let error = walk_builders(&mut env, &tree).unwrap_err();
        assert_eq!(error.errors, vec![BuildError::unknown_namespace("Nowhere")]);
    }

    // ========== TEST: extension_base_provenance ==========
    #[test]
    fn test_extension_records_base_provenance() {
        let mut env = environment(&["EdFi", "Sample"]);
        let extension =
            DeclarationNode::new(ModelType::DomainEntityExtension, Token::new("Student", 2, 0))
                .based_on(NameNode::qualified(
                    Token::new("EdFi", 2, 30),
                    Token::new("Student", 2, 35),
                ));
        let tree = ParseTree::new().namespace(NamespaceNode::new("Sample").declare(extension));

        walk_builders(&mut env, &tree).unwrap();

        let sample = env.graph.namespace_by_name("Sample").unwrap();
        let id = sample.entity(ModelType::DomainEntityExtension, "Student").unwrap();
        let entity = env.graph.entity(id).unwrap();
        assert_eq!(
            entity.source_map.get(SourceField::BaseEntityNamespaceName).map(|m| m.column),
            Some(30)
        );
        assert_eq!(entity.base().map(|b| b.namespace_name.as_str()), Some("EdFi"));
    }
}
