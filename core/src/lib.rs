//! MetaEd Core Types
//!
//! This crate provides the foundational types used throughout the MetaEd engine:
//! - Arena identifiers (NamespaceId, EntityId, PropertyId)
//! - Source provenance (SourceMap, SourceMaps, SourceField)
//! - Diagnostics (ValidationFailure, ValidationFailures)
//! - Enhancer outcomes (EnhancerResult)

mod failure;
mod id;
mod outcome;
mod source_map;

pub use failure::*;
pub use id::*;
pub use outcome::*;
pub use source_map::*;
