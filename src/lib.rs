//! tulsigen - generator configs for Bazel-backed Xcode projects
//!
//! This crate models the configuration an Xcode project is generated from:
//! which Bazel targets to include, which source directories to show, the
//! generator options, and where the Bazel binary lives.

pub mod config;
pub mod filters;
pub mod locator;
pub mod parameter;

pub use config::{ConfigError, GeneratorConfig, ProjectScope};
pub use filters::normalize_path_filters;
pub use locator::{resolve_bazel_url, BazelLocator};
pub use parameter::{Parameter, ProvenanceTier};
pub use tulsi_label::{BuildLabel, RuleInfo};
pub use tulsi_options::{OptionSet, OptionValue};
