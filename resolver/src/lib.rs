//! MetaEd Resolver
//!
//! Name lookup across namespaces. Lookups never fail and never touch the
//! graph; a miss is `None`.
//! - `resolve` - one name, kinds in priority order, local namespace first
//! - `resolve_reference` / `resolve_base` - lookups driven by graph data
//! - Merge directive path helpers

mod lookup;
mod merge;

pub use lookup::*;
pub use merge::*;
