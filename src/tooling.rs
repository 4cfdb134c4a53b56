//! Tooling & Integration Layer
//!
//! Command-line surface over the reconciliation pipeline. Keeps file
//! handling and output rendering out of the core tree passes so the engine
//! stays usable as a library.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
