//! Application-level utilities for the memo CLI.
//!
//! - Path resolution for config and storage files
//! - The per-invocation context that opens the gate and the note session

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
