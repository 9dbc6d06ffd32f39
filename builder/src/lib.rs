//! MetaEd Builder
//!
//! Populates the entity graph from a parse tree:
//! - `ParseTree` - the declarations handed over by the front end
//! - `DeclarationBuilder` - per-kind payload construction
//! - `property_def` - property declarations to graph definitions
//! - `walk_builders` - builds every namespace and seals the graph

mod error;
mod kinds;
mod parse_tree;
mod property;
mod walk;

pub use error::*;
pub use kinds::*;
pub use parse_tree::*;
pub use property::*;
pub use walk::*;
