//! Property declarations to property definitions.

use crate::PropertyNode;
use metaed_core::SourceField;
use metaed_model::{
    MergeDirective, PropertyDef, PropertyKind, PropertyType, Reference, ReferenceType,
};

const SCHOOL_YEAR: &str = "SchoolYear";

/// Turn a property declaration into a definition for the graph.
///
/// Referential properties get their referenced namespace set here, defaulting
/// to the declaring namespace; the referenced entity itself stays unresolved.
pub fn property_def(node: &PropertyNode, namespace_name: &str) -> PropertyDef {
    let shared_name = node.shared_type.as_ref().map(|shared| shared.name.text.as_str());
    let meta_ed_name = node
        .name
        .as_ref()
        .map(|token| token.text.clone())
        .or_else(|| shared_name.map(str::to_string))
        .unwrap_or_default();

    let kind = match node.kind {
        PropertyType::Simple(simple_type) => PropertyKind::Simple {
            simple_type,
            facets: node.facets.clone(),
        },
        PropertyType::Reference(reference_type) => {
            let reference_type = if reference_type == ReferenceType::Enumeration
                && meta_ed_name == SCHOOL_YEAR
            {
                ReferenceType::SchoolYearEnumeration
            } else {
                reference_type
            };
            let referenced_type = match shared_name {
                Some(shared) if reference_type.is_shared() => shared.to_string(),
                _ => meta_ed_name.clone(),
            };
            let referenced_namespace_name = node
                .referenced_namespace
                .as_ref()
                .or_else(|| node.shared_type.as_ref().and_then(|s| s.namespace.as_ref()))
                .map(|token| token.text.clone())
                .unwrap_or_else(|| namespace_name.to_string());

            let mut reference = Reference::new(referenced_type, referenced_namespace_name);
            reference.is_weak = node.is_weak;
            reference.merge_directives = node
                .merge_directives
                .iter()
                .map(|directive| {
                    MergeDirective::new(&directive.source_path.text, &directive.target_path.text)
                        .at(directive.source_path.source_map())
                })
                .collect();
            PropertyKind::reference(reference_type, reference)
        }
    };

    let mut def = PropertyDef::new(meta_ed_name, kind).cardinality(node.cardinality);
    if let Some(documentation) = &node.documentation {
        def = def
            .documentation(documentation.text.clone())
            .source(SourceField::Documentation, documentation.source_map());
    }
    if let Some(role_name) = &node.role_name {
        def = def
            .role_name(role_name.text.clone())
            .source(SourceField::RoleName, role_name.source_map());
    }
    if let Some(shorten_to) = &node.shorten_to {
        def = def
            .shorten_to(shorten_to.text.clone())
            .source(SourceField::ShortenTo, shorten_to.source_map());
    }
    if let Some(base_key) = &node.identity_rename {
        def = def
            .identity_rename(base_key.text.clone())
            .source(SourceField::IsIdentityRename, base_key.source_map());
    } else if node.is_part_of_identity {
        def = def.identity();
    }
    if node.is_deprecated {
        def = def.deprecated();
    }
    if let Some(keyword) = &node.keyword {
        def = def.source(SourceField::Type, keyword.source_map());
    }
    if let Some(name) = &node.name {
        def = def.source(SourceField::MetaEdName, name.source_map());
    }
    if let Some(namespace) = &node.referenced_namespace {
        def = def.source(SourceField::ReferencedNamespaceName, namespace.source_map());
    }
    def
}
