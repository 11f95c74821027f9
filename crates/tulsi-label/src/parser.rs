//! Label string parsing.
//!
//! Accepts the shapes a generator config may contain:
//! - `//foo/bar:target` (absolute label)
//! - `@repo//foo/bar:target` (external repository label)
//! - `//foo/bar` (implicit target, named after the last package component)
//! - `foo/bar` (package-relative path, as written back into source filters)

use std::sync::OnceLock;

use regex_lite::Regex;

/// Structured components of a parsed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParts {
    /// External repository name, without the leading `@`.
    pub repository: Option<String>,

    /// Package path, without the leading `//`.
    pub package: String,

    /// Target name.
    pub target: String,
}

/// Label parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,

    #[error("label contains whitespace: '{0}'")]
    ContainsWhitespace(String),

    #[error("absolute filesystem path is not a label: '{0}'")]
    AbsolutePath(String),

    #[error("external repository label is missing '//': '{0}'")]
    MissingRoot(String),

    #[error("label has more than one ':' separator: '{0}'")]
    TooManyColons(String),

    #[error("package path contains an empty segment: '{0}'")]
    InvalidPackage(String),

    #[error("invalid target name in '{0}'")]
    InvalidTarget(String),
}

fn target_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r##"^[A-Za-z0-9!%@^_"#$&'()*\-+,;<=>?\[\]{|}~/.\x{80}-\x{10FFFF}]+$"##)
            .expect("target pattern is valid")
    })
}

/// Check a target name against the characters Bazel accepts in one.
pub fn validate_target_name(label: &str, target: &str) -> Result<(), LabelError> {
    if target_pattern().is_match(target) {
        Ok(())
    } else {
        Err(LabelError::InvalidTarget(label.to_string()))
    }
}

/// Split a label string into its components.
///
/// Only the label's structure is checked: prefix, separators, whitespace.
/// Package and target text is taken as written; use
/// [`validate_target_name`] to check the target.
pub fn parse_label(value: &str) -> Result<LabelParts, LabelError> {
    if value.is_empty() {
        return Err(LabelError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(LabelError::ContainsWhitespace(value.to_string()));
    }

    let (repository, rest) = if let Some(stripped) = value.strip_prefix('@') {
        let idx = stripped
            .find("//")
            .ok_or_else(|| LabelError::MissingRoot(value.to_string()))?;
        (Some(stripped[..idx].to_string()), &stripped[idx + 2..])
    } else if let Some(stripped) = value.strip_prefix("//") {
        (None, stripped)
    } else if value.starts_with('/') {
        return Err(LabelError::AbsolutePath(value.to_string()));
    } else {
        (None, value)
    };

    let mut parts = rest.split(':');
    let package = parts.next().unwrap_or_default();
    let explicit_target = parts.next();
    if parts.next().is_some() {
        return Err(LabelError::TooManyColons(value.to_string()));
    }

    if package.contains("//") {
        return Err(LabelError::InvalidPackage(value.to_string()));
    }

    let target = match explicit_target {
        Some(target) => target.to_string(),
        // `//foo/bar` is shorthand for `//foo/bar:bar`.
        None => package
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    Ok(LabelParts {
        repository,
        package: package.to_string(),
        target,
    })
}
