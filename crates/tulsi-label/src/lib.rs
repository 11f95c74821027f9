//! Bazel build labels.
//!
//! A label names a build target within a package, e.g. `//foo/bar:baz`.
//! Generator configs store labels as plain strings; this crate gives them
//! structure (package path, target name) without rejecting malformed input
//! at construction time.

mod parser;

pub use parser::{parse_label, validate_target_name, LabelError, LabelParts};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Bazel label as written in a config file.
///
/// Construction never fails. Malformed labels simply have no package or
/// target component. Ordering and equality use the raw string value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildLabel {
    value: String,
}

impl BuildLabel {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The label exactly as written.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parsed components, or the reason the label is malformed.
    pub fn parts(&self) -> Result<LabelParts, LabelError> {
        parse_label(&self.value)
    }

    /// Package path component (`foo/bar` for `//foo/bar:baz`).
    pub fn package_name(&self) -> Option<String> {
        self.parts().ok().map(|p| p.package)
    }

    /// Target name component (`baz` for `//foo/bar:baz`).
    pub fn target_name(&self) -> Option<String> {
        self.parts().ok().map(|p| p.target)
    }

    /// Parses and names a target Bazel would accept.
    pub fn validate(&self) -> Result<(), LabelError> {
        let parts = self.parts()?;
        validate_target_name(&self.value, &parts.target)
    }
}

impl fmt::Display for BuildLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for BuildLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BuildLabel {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A build rule discovered in a workspace: its label and rule type
/// (e.g. `ios_application`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub label: BuildLabel,
    #[serde(rename = "type")]
    pub rule_type: String,
}

impl RuleInfo {
    pub fn new(label: impl Into<BuildLabel>, rule_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            rule_type: rule_type.into(),
        }
    }
}
