//! MetaEd Pipeline
//!
//! Runs plugins over a built environment:
//! - `MetaEdPlugin` - named validators, enhancers and generators
//! - `order_plugins` - dependency order over plugin short names
//! - `run_validators` / `run_enhancers` / `run_generators` - the three passes
//! - `MetaEdConfiguration` and model annotation from config rules
//! - `Pipeline` / `execute_pipeline` - the staged end-to-end run
//! - `RunReport` - failures, enhancer outcomes, generated output

mod annotate;
mod config;
mod error;
mod generator;
mod plugin;
mod report;
mod run;
mod stage;

pub use annotate::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use plugin::*;
pub use report::*;
pub use run::*;
pub use stage::*;
