//! # Configuration
//!
//! TOML configuration of a merge project: directory roots, per-cruise identity,
//! global attributes, discovery markers, alignment policy, unit vocabulary, and
//! archive options. Every section but `input_dir` and `output_dir` is optional.
//!
//! Configuration is passed explicitly to discovery and merge functions.

mod error;
mod project;


pub use error::ConfigError;
pub(crate) use error::read_config_file;
pub use project::{CruiseInfo, ProjectConfig};
