//! MetaEd Namespace Resolution
//!
//! Turns the flat list of configured projects into namespaces with ordered,
//! transitively closed dependency lists:
//! - `ProjectConfiguration` - one project as configured
//! - `resolve_namespaces` - validation, closure and dependency ordering
//! - `initialize_namespaces` - installs the result into an `EntityGraph`

mod config;
mod error;
mod resolver;

pub use config::*;
pub use error::*;
pub use resolver::*;
