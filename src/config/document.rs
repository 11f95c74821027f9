//! The generator config value

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tulsi_label::{BuildLabel, RuleInfo};
use tulsi_options::OptionSet;

use super::error::ConfigError;
use crate::parameter::Parameter;

/// File extension of saved generator configs.
pub const FILE_EXTENSION: &str = "tulsigen";

/// Project name used when a config does not provide one.
pub const DEFAULT_PROJECT_NAME: &str = "Unnamed Tulsi Project";

/// Prefix marking a string as a label rather than a filesystem path.
pub(crate) const LABEL_ROOT_PREFIX: &str = "//";

/// A configuration from which an Xcode project can be generated.
///
/// Immutable; transformations return a new config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub(super) project_name: String,
    pub(super) build_target_labels: Vec<BuildLabel>,
    pub(super) path_filters: BTreeSet<String>,
    pub(super) additional_file_paths: Option<Vec<String>>,
    pub(super) options: OptionSet,
    pub(super) bazel_url: Parameter<PathBuf>,
}

impl GeneratorConfig {
    /// Build a config from already validated parts.
    ///
    /// `path_filters` are expected to be normalized package paths. Additional
    /// file paths must be filesystem paths, not labels.
    pub fn new(
        project_name: impl Into<String>,
        build_target_labels: Vec<BuildLabel>,
        path_filters: BTreeSet<String>,
        additional_file_paths: Option<Vec<String>>,
        options: OptionSet,
        bazel_url: Parameter<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(bad) = first_label_shaped_path(additional_file_paths.as_deref()) {
            return Err(ConfigError::InvalidAdditionalFilePath(bad.to_string()));
        }

        let mut project_name = project_name.into();
        if project_name.is_empty() {
            project_name = DEFAULT_PROJECT_NAME.to_string();
        }

        Ok(Self {
            project_name,
            build_target_labels,
            path_filters,
            additional_file_paths,
            options,
            bazel_url,
        })
    }

    /// Build a config from discovered rules, keeping only their labels.
    pub fn from_rules<I>(
        project_name: impl Into<String>,
        rules: I,
        path_filters: BTreeSet<String>,
        additional_file_paths: Option<Vec<String>>,
        options: OptionSet,
        bazel_url: Parameter<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = RuleInfo>,
    {
        Self::new(
            project_name,
            rules.into_iter().map(|rule| rule.label).collect(),
            path_filters,
            additional_file_paths,
            options,
            bazel_url,
        )
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Bazel targets to generate Xcode targets for.
    pub fn build_target_labels(&self) -> &[BuildLabel] {
        &self.build_target_labels
    }

    /// Package paths whose sources are included in the project.
    pub fn path_filters(&self) -> &BTreeSet<String> {
        &self.path_filters
    }

    /// Extra files added to the project (e.g. BUILD files).
    pub fn additional_file_paths(&self) -> Option<&[String]> {
        self.additional_file_paths.as_deref()
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Path to the Bazel binary.
    pub fn bazel_url(&self) -> &Path {
        &self.bazel_url.value
    }

    /// Path to the Bazel binary along with the tier it was resolved from.
    pub fn bazel_url_parameter(&self) -> &Parameter<PathBuf> {
        &self.bazel_url
    }

    /// Filename this config is saved under.
    pub fn default_filename(&self) -> String {
        sanitize_filename(&format!("{}.{}", self.project_name, FILE_EXTENSION))
    }

    /// Filename of the Xcode project generated from this config.
    pub fn xcode_project_filename(&self) -> String {
        sanitize_filename(&format!("{}.xcodeproj", self.project_name))
    }

    /// Returns a copy whose path filters also include `additional`.
    ///
    /// The extra filters are not normalized.
    pub fn appending_path_filters<I>(&self, additional: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut path_filters = self.path_filters.clone();
        path_filters.extend(additional);
        Self {
            path_filters,
            ..self.clone()
        }
    }
}

/// Name of the per-user options file for the current user.
pub fn per_user_filename() -> String {
    format!("{}.{}-user", whoami::username(), FILE_EXTENSION)
}

/// Replace path separators and spaces with underscores.
pub fn sanitize_filename(filename: &str) -> String {
    filename.replace(['/', ' '], "_")
}

pub(super) fn first_label_shaped_path(paths: Option<&[String]>) -> Option<&str> {
    paths?
        .iter()
        .find(|p| p.starts_with(LABEL_ROOT_PREFIX))
        .map(String::as_str)
}
