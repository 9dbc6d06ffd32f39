//! Closed sets of entity and property kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a top-level entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelType {
    Association,
    AssociationExtension,
    AssociationSubclass,
    Choice,
    Common,
    CommonExtension,
    CommonSubclass,
    Descriptor,
    Domain,
    DomainEntity,
    DomainEntityExtension,
    DomainEntitySubclass,
    Enumeration,
    InlineCommon,
    Interchange,
    InterchangeExtension,
    SchoolYearEnumeration,
    SharedDecimal,
    SharedInteger,
    SharedShort,
    SharedString,
    Subdomain,
}

impl ModelType {
    /// Every entity kind, in declaration order.
    pub const ALL: [ModelType; 22] = [
        ModelType::Association,
        ModelType::AssociationExtension,
        ModelType::AssociationSubclass,
        ModelType::Choice,
        ModelType::Common,
        ModelType::CommonExtension,
        ModelType::CommonSubclass,
        ModelType::Descriptor,
        ModelType::Domain,
        ModelType::DomainEntity,
        ModelType::DomainEntityExtension,
        ModelType::DomainEntitySubclass,
        ModelType::Enumeration,
        ModelType::InlineCommon,
        ModelType::Interchange,
        ModelType::InterchangeExtension,
        ModelType::SchoolYearEnumeration,
        ModelType::SharedDecimal,
        ModelType::SharedInteger,
        ModelType::SharedShort,
        ModelType::SharedString,
        ModelType::Subdomain,
    ];

    /// The camelCase tag used in configuration and snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Association => "association",
            ModelType::AssociationExtension => "associationExtension",
            ModelType::AssociationSubclass => "associationSubclass",
            ModelType::Choice => "choice",
            ModelType::Common => "common",
            ModelType::CommonExtension => "commonExtension",
            ModelType::CommonSubclass => "commonSubclass",
            ModelType::Descriptor => "descriptor",
            ModelType::Domain => "domain",
            ModelType::DomainEntity => "domainEntity",
            ModelType::DomainEntityExtension => "domainEntityExtension",
            ModelType::DomainEntitySubclass => "domainEntitySubclass",
            ModelType::Enumeration => "enumeration",
            ModelType::InlineCommon => "inlineCommon",
            ModelType::Interchange => "interchange",
            ModelType::InterchangeExtension => "interchangeExtension",
            ModelType::SchoolYearEnumeration => "schoolYearEnumeration",
            ModelType::SharedDecimal => "sharedDecimal",
            ModelType::SharedInteger => "sharedInteger",
            ModelType::SharedShort => "sharedShort",
            ModelType::SharedString => "sharedString",
            ModelType::Subdomain => "subdomain",
        }
    }

    /// Parse a camelCase tag.
    pub fn from_tag(tag: &str) -> Option<ModelType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == tag)
    }

    /// The keyword as a modeler writes it, for messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::Association => "Association",
            ModelType::AssociationExtension => "Association additions",
            ModelType::AssociationSubclass => "Association based on",
            ModelType::Choice => "Choice",
            ModelType::Common => "Common",
            ModelType::CommonExtension => "Common additions",
            ModelType::CommonSubclass => "Common based on",
            ModelType::Descriptor => "Descriptor",
            ModelType::Domain => "Domain",
            ModelType::DomainEntity => "Domain Entity",
            ModelType::DomainEntityExtension => "Domain Entity additions",
            ModelType::DomainEntitySubclass => "Domain Entity based on",
            ModelType::Enumeration => "Enumeration",
            ModelType::InlineCommon => "Inline Common",
            ModelType::Interchange => "Interchange",
            ModelType::InterchangeExtension => "Interchange additions",
            ModelType::SchoolYearEnumeration => "School Year Enumeration",
            ModelType::SharedDecimal => "Shared Decimal",
            ModelType::SharedInteger => "Shared Integer",
            ModelType::SharedShort => "Shared Short",
            ModelType::SharedString => "Shared String",
            ModelType::Subdomain => "Subdomain",
        }
    }

    /// Check if entities of this kind extend a base entity in place.
    pub fn is_extension(&self) -> bool {
        matches!(
            self,
            ModelType::AssociationExtension
                | ModelType::CommonExtension
                | ModelType::DomainEntityExtension
                | ModelType::InterchangeExtension
        )
    }

    /// Check if entities of this kind derive a new entity from a base.
    pub fn is_subclass(&self) -> bool {
        matches!(
            self,
            ModelType::AssociationSubclass
                | ModelType::CommonSubclass
                | ModelType::DomainEntitySubclass
        )
    }

    /// Kinds a base-entity reference of this kind may resolve to, in priority order.
    pub fn base_model_types(&self) -> &'static [ModelType] {
        match self {
            ModelType::AssociationExtension => {
                &[ModelType::Association, ModelType::AssociationSubclass]
            }
            ModelType::AssociationSubclass => &[ModelType::Association],
            ModelType::CommonExtension => &[ModelType::Common],
            ModelType::CommonSubclass => &[ModelType::Common],
            ModelType::DomainEntityExtension => {
                &[ModelType::DomainEntity, ModelType::DomainEntitySubclass]
            }
            ModelType::DomainEntitySubclass => &[ModelType::DomainEntity],
            ModelType::InterchangeExtension => &[ModelType::Interchange],
            _ => &[],
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-referential property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleType {
    Boolean,
    Currency,
    Date,
    Datetime,
    Decimal,
    Duration,
    Integer,
    Percent,
    Short,
    String,
    Time,
    Year,
}

/// Property kinds that name another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceType {
    Association,
    Choice,
    Common,
    Descriptor,
    DomainEntity,
    Enumeration,
    InlineCommon,
    SchoolYearEnumeration,
    SharedDecimal,
    SharedInteger,
    SharedShort,
    SharedString,
}

impl ReferenceType {
    /// Every referential kind.
    pub const ALL: [ReferenceType; 12] = [
        ReferenceType::Association,
        ReferenceType::Choice,
        ReferenceType::Common,
        ReferenceType::Descriptor,
        ReferenceType::DomainEntity,
        ReferenceType::Enumeration,
        ReferenceType::InlineCommon,
        ReferenceType::SchoolYearEnumeration,
        ReferenceType::SharedDecimal,
        ReferenceType::SharedInteger,
        ReferenceType::SharedShort,
        ReferenceType::SharedString,
    ];

    /// Entity kinds a property of this kind may resolve to, in priority order.
    pub fn referenced_model_types(&self) -> &'static [ModelType] {
        match self {
            ReferenceType::Association => {
                &[ModelType::Association, ModelType::AssociationSubclass]
            }
            ReferenceType::Choice => &[ModelType::Choice],
            ReferenceType::Common => &[ModelType::Common],
            ReferenceType::Descriptor => &[ModelType::Descriptor],
            ReferenceType::DomainEntity => {
                &[ModelType::DomainEntity, ModelType::DomainEntitySubclass]
            }
            ReferenceType::Enumeration => &[ModelType::Enumeration],
            ReferenceType::InlineCommon => &[ModelType::InlineCommon],
            ReferenceType::SchoolYearEnumeration => &[ModelType::SchoolYearEnumeration],
            ReferenceType::SharedDecimal => &[ModelType::SharedDecimal],
            ReferenceType::SharedInteger => &[ModelType::SharedInteger],
            ReferenceType::SharedShort => &[ModelType::SharedShort],
            ReferenceType::SharedString => &[ModelType::SharedString],
        }
    }

    /// The primary entity kind this property kind targets.
    pub fn target_model_type(&self) -> ModelType {
        self.referenced_model_types()[0]
    }

    /// Check if properties of this kind default their name to the referenced type.
    pub fn is_shared(&self) -> bool {
        matches!(
            self,
            ReferenceType::SharedDecimal
                | ReferenceType::SharedInteger
                | ReferenceType::SharedShort
                | ReferenceType::SharedString
        )
    }
}

/// Flattened property kind, used as the PropertyIndex key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Simple(SimpleType),
    Reference(ReferenceType),
}

impl PropertyType {
    /// The camelCase tag used in messages and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Simple(simple) => match simple {
                SimpleType::Boolean => "boolean",
                SimpleType::Currency => "currency",
                SimpleType::Date => "date",
                SimpleType::Datetime => "datetime",
                SimpleType::Decimal => "decimal",
                SimpleType::Duration => "duration",
                SimpleType::Integer => "integer",
                SimpleType::Percent => "percent",
                SimpleType::Short => "short",
                SimpleType::String => "string",
                SimpleType::Time => "time",
                SimpleType::Year => "year",
            },
            PropertyType::Reference(reference) => reference.target_model_type().as_str(),
        }
    }

    /// Check if properties of this kind name another entity.
    pub fn is_referential(&self) -> bool {
        matches!(self, PropertyType::Reference(_))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
