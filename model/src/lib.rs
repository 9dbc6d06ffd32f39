//! MetaEd Model
//!
//! The in-memory entity graph every pass works against:
//! - Entity and property kinds as closed enums
//! - Namespaces with per-kind entity repositories
//! - The arena-backed `EntityGraph` and its property index
//! - `MetaEdEnvironment`, the root aggregate of a run
//! - Typed plugin side data (`PluginKey`, `SideTable`)
//! - JSON snapshots of a built graph

mod entity;
mod environment;
mod error;
mod graph;
mod model_type;
mod namespace;
mod property;
mod property_index;
mod side_data;
mod snapshot;

pub use entity::*;
pub use environment::*;
pub use error::*;
pub use graph::*;
pub use model_type::*;
pub use namespace::*;
pub use property::*;
pub use property_index::*;
pub use side_data::*;
pub use snapshot::*;
