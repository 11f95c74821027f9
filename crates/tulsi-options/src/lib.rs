//! Option storage for generator configs.
//!
//! Options live under a single container key in the config document. Each
//! option is classified as shareable (checked in) or per-user (local only),
//! and can inherit unset values from a parent project's option set.

pub mod catalog;
mod set;

pub use catalog::{OptionDefinition, OptionScope, BAZEL_PATH, WORKSPACE_ROOT_PATH};
pub use set::{OptionSet, OptionValue, OptionsError};

/// Key of the options container inside a config document.
pub const PERSISTENCE_KEY: &str = "tulsi_options";

/// Raw, untyped option values as read from JSON.
pub type OptionDictionary = serde_json::Map<String, serde_json::Value>;
