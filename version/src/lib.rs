//! MetaEd Version Gate
//!
//! Validators and enhancers gate themselves on either the data standard
//! version or a plugin's target technology version:
//!
//! ```ignore
//! if !version_satisfies(&env.data_standard_version, V3_OR_GREATER) {
//!     return Vec::new();
//! }
//! ```

mod error;
mod gate;
mod version;

pub use error::*;
pub use gate::*;
pub use version::*;
