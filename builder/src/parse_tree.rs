//! The parse tree handed over by the external front end.
//!
//! Every top-level declaration exposes its kind, its name token and its
//! property declarations in source order. Tokens carry their line and column
//! so the builder can attach per-field provenance.

use metaed_model::{Cardinality, ModelType, PropertyType, SimpleFacets};
use metaed_core::SourceMap;

/// One token of source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    /// Create a token at a position.
    pub fn new(text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }

    /// Provenance for this token.
    pub fn source_map(&self) -> SourceMap {
        SourceMap::new(self.line, self.column, self.text.clone())
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::new(text, 0, 0)
    }
}

/// Whole-run parse tree.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    pub namespaces: Vec<NamespaceNode>,
}

impl ParseTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace block.
    pub fn namespace(mut self, namespace: NamespaceNode) -> Self {
        self.namespaces.push(namespace);
        self
    }
}

/// Declarations of one namespace.
#[derive(Debug, Clone, Default)]
pub struct NamespaceNode {
    pub namespace_name: String,
    pub declarations: Vec<DeclarationNode>,
}

impl NamespaceNode {
    /// Create an empty namespace block.
    pub fn new(namespace_name: impl Into<String>) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            declarations: Vec::new(),
        }
    }

    /// Add a declaration.
    pub fn declare(mut self, declaration: DeclarationNode) -> Self {
        self.declarations.push(declaration);
        self
    }
}

/// A reference to another entity by name, optionally namespace-qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNode {
    pub name: Token,
    pub namespace: Option<Token>,
}

impl NameNode {
    /// An unqualified name.
    pub fn new(name: impl Into<Token>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// A namespace-qualified name.
    pub fn qualified(namespace: impl Into<Token>, name: impl Into<Token>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }
}

/// An enumeration item or descriptor map-type item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNode {
    pub short_description: String,
    pub documentation: String,
}

/// One top-level declaration.
#[derive(Debug, Clone)]
pub struct DeclarationNode {
    pub kind: ModelType,
    pub keyword: Option<Token>,
    pub name: Token,
    pub documentation: Option<Token>,
    /// Base entity of an extension or subclass; parent of a subdomain.
    pub base: Option<NameNode>,
    pub is_abstract: bool,
    pub allow_primary_key_updates: bool,
    pub deprecation_reason: Option<String>,
    pub items: Vec<ItemNode>,
    pub is_map_type_required: bool,
    pub is_map_type_optional: bool,
    /// Domain items, or interchange element items.
    pub members: Vec<NameNode>,
    /// Interchange identity template items.
    pub identity_templates: Vec<NameNode>,
    pub facets: SimpleFacets,
    pub properties: Vec<PropertyNode>,
    pub file: Option<String>,
}

impl DeclarationNode {
    /// Create a declaration of a kind.
    pub fn new(kind: ModelType, name: impl Into<Token>) -> Self {
        Self {
            kind,
            keyword: None,
            name: name.into(),
            documentation: None,
            base: None,
            is_abstract: false,
            allow_primary_key_updates: false,
            deprecation_reason: None,
            items: Vec::new(),
            is_map_type_required: false,
            is_map_type_optional: false,
            members: Vec::new(),
            identity_templates: Vec::new(),
            facets: SimpleFacets::default(),
            properties: Vec::new(),
            file: None,
        }
    }

    /// Set the keyword token.
    pub fn keyword(mut self, keyword: impl Into<Token>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Set documentation.
    pub fn documentation(mut self, documentation: impl Into<Token>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Set the base entity.
    pub fn based_on(mut self, base: NameNode) -> Self {
        self.base = Some(base);
        self
    }

    /// Mark as abstract.
    pub fn abstract_entity(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Allow primary key updates.
    pub fn allow_primary_key_updates(mut self) -> Self {
        self.allow_primary_key_updates = true;
        self
    }

    /// Mark as deprecated.
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    /// Add an enumeration or map-type item.
    pub fn item(
        mut self,
        short_description: impl Into<String>,
        documentation: impl Into<String>,
    ) -> Self {
        self.items.push(ItemNode {
            short_description: short_description.into(),
            documentation: documentation.into(),
        });
        self
    }

    /// Require or allow a descriptor map type.
    pub fn map_type(mut self, required: bool) -> Self {
        self.is_map_type_required = required;
        self.is_map_type_optional = !required;
        self
    }

    /// Add a domain item or interchange element.
    pub fn member(mut self, member: NameNode) -> Self {
        self.members.push(member);
        self
    }

    /// Add an interchange identity template item.
    pub fn identity_template(mut self, member: NameNode) -> Self {
        self.identity_templates.push(member);
        self
    }

    /// Set simple-type facets.
    pub fn facets(mut self, facets: SimpleFacets) -> Self {
        self.facets = facets;
        self
    }

    /// Add a property declaration.
    pub fn property(mut self, property: PropertyNode) -> Self {
        self.properties.push(property);
        self
    }

    /// Record the source file.
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A merge directive on a reference property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDirectiveNode {
    pub source_path: Token,
    pub target_path: Token,
}

/// One property declaration.
#[derive(Debug, Clone)]
pub struct PropertyNode {
    pub kind: PropertyType,
    pub keyword: Option<Token>,
    /// Property name; shared-type properties may omit it.
    pub name: Option<Token>,
    /// Referenced type for shared-type properties declared with a different name.
    pub shared_type: Option<NameNode>,
    pub referenced_namespace: Option<Token>,
    pub documentation: Option<Token>,
    pub role_name: Option<Token>,
    pub shorten_to: Option<Token>,
    pub is_part_of_identity: bool,
    pub identity_rename: Option<Token>,
    pub cardinality: Cardinality,
    pub is_weak: bool,
    pub is_deprecated: bool,
    pub facets: SimpleFacets,
    pub merge_directives: Vec<MergeDirectiveNode>,
}

impl PropertyNode {
    /// Create a required property of a kind.
    pub fn new(kind: PropertyType, name: impl Into<Token>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::unnamed(kind)
        }
    }

    /// Create a property whose name defaults to its referenced type.
    pub fn unnamed(kind: PropertyType) -> Self {
        Self {
            kind,
            keyword: None,
            name: None,
            shared_type: None,
            referenced_namespace: None,
            documentation: None,
            role_name: None,
            shorten_to: None,
            is_part_of_identity: false,
            identity_rename: None,
            cardinality: Cardinality::Required,
            is_weak: false,
            is_deprecated: false,
            facets: SimpleFacets::default(),
            merge_directives: Vec::new(),
        }
    }

    /// Set the keyword token.
    pub fn keyword(mut self, keyword: impl Into<Token>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Reference a shared type by name.
    pub fn shared(mut self, shared_type: NameNode) -> Self {
        self.shared_type = Some(shared_type);
        self
    }

    /// Qualify the referenced entity with a namespace.
    pub fn in_namespace(mut self, namespace: impl Into<Token>) -> Self {
        self.referenced_namespace = Some(namespace.into());
        self
    }

    /// Set documentation.
    pub fn documentation(mut self, documentation: impl Into<Token>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Set the role name.
    pub fn role_name(mut self, role_name: impl Into<Token>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    /// Set the shortened role name.
    pub fn shorten_to(mut self, shorten_to: impl Into<Token>) -> Self {
        self.shorten_to = Some(shorten_to.into());
        self
    }

    /// Mark as part of identity.
    pub fn identity(mut self) -> Self {
        self.is_part_of_identity = true;
        self
    }

    /// Mark as an identity rename of a base key.
    pub fn renames_identity(mut self, base_key_name: impl Into<Token>) -> Self {
        self.identity_rename = Some(base_key_name.into());
        self
    }

    /// Set cardinality.
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Mark as a weak reference.
    pub fn weak(mut self) -> Self {
        self.is_weak = true;
        self
    }

    /// Mark as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    /// Set simple-type facets.
    pub fn facets(mut self, facets: SimpleFacets) -> Self {
        self.facets = facets;
        self
    }

    /// Add a merge directive.
    pub fn merge(mut self, source_path: impl Into<Token>, target_path: impl Into<Token>) -> Self {
        self.merge_directives.push(MergeDirectiveNode {
            source_path: source_path.into(),
            target_path: target_path.into(),
        });
        self
    }
}
