//! Source provenance for diagnostics.
//!
//! Provenance is kept per logical field, not per entity: a diagnostic about a
//! role name points at the role name token, not at the declaration keyword.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Location of one token in a MetaEd source file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceMap {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column number.
    pub column: u32,
    /// The token text as written.
    pub token_text: String,
}

impl SourceMap {
    /// Create a new source map.
    pub fn new(line: u32, column: u32, token_text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            token_text: token_text.into(),
        }
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Logical field of an entity or property that carries provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceField {
    Type,
    MetaEdName,
    Documentation,
    BaseEntityName,
    BaseEntityNamespaceName,
    RoleName,
    ShortenTo,
    ReferencedNamespaceName,
    IsPartOfIdentity,
    IsIdentityRename,
    Cardinality,
    IsWeak,
    MergeDirective,
    Deprecated,
}

/// Per-field provenance of one entity or property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceMaps {
    fields: BTreeMap<SourceField, SourceMap>,
}

impl SourceMaps {
    /// Create an empty provenance record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the location of a field, replacing any previous one.
    pub fn insert(&mut self, field: SourceField, map: SourceMap) {
        self.fields.insert(field, map);
    }

    /// Location of a field, if recorded.
    pub fn get(&self, field: SourceField) -> Option<&SourceMap> {
        self.fields.get(&field)
    }

    /// Location of the name token, falling back to the type keyword.
    pub fn primary(&self) -> Option<&SourceMap> {
        self.get(SourceField::MetaEdName)
            .or_else(|| self.get(SourceField::Type))
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate recorded fields in field order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceField, &SourceMap)> {
        self.fields.iter().map(|(field, map)| (*field, map))
    }
}

/// Location of a declaration within the loaded source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMap {
    /// Full path of the file as loaded.
    pub full_path: String,
    /// 1-based line within that file.
    pub line_number: u32,
}

impl FileMap {
    /// Create a new file map.
    pub fn new(full_path: impl Into<String>, line_number: u32) -> Self {
        Self {
            full_path: full_path.into(),
            line_number,
        }
    }
}

impl fmt::Display for FileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.full_path, self.line_number)
    }
}
