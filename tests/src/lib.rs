//! MetaEd Integration Tests
//!
//! A scenario harness over the full pipeline:
//! - `Scenario` builds projects, a parse tree and plugins, then runs every stage
//! - `Expectation` checks the run report
//! - `fixtures` holds the EdFi core and Sample extension models used across tests

mod assertion;
mod error;
pub mod fixtures;
mod scenario;

pub use assertion::*;
pub use error::*;
pub use scenario::*;

use tracing_subscriber::EnvFilter;

/// Install a test log subscriber once. Honors `RUST_LOG`; later calls do nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Everything a test file needs.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::{init_tracing, Expectation, Scenario, ScenarioError, ScenarioResult};
    pub use metaed_builder::{DeclarationNode, NameNode, NamespaceNode, ParseTree, PropertyNode};
    pub use metaed_core::{EnhancerResult, ValidationFailure};
    pub use metaed_model::{
        Cardinality, MetaEdEnvironment, ModelType, PropertyType, ReferenceType, SimpleType,
    };
    pub use metaed_namespace::ProjectConfiguration;
    pub use metaed_pipeline::{MetaEdConfiguration, MetaEdPlugin, RunReport};
}
