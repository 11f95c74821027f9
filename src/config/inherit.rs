//! Resolving settings a config inherits from its enclosing project.

use std::path::PathBuf;

use tulsi_options::OptionSet;

use super::document::GeneratorConfig;
use crate::parameter::{Parameter, ProvenanceTier};

/// The project-level settings a config may inherit from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    pub options: OptionSet,
    pub bazel_url: PathBuf,
}

impl ProjectScope {
    pub fn new(options: OptionSet, bazel_url: impl Into<PathBuf>) -> Self {
        Self {
            options,
            bazel_url: bazel_url.into(),
        }
    }
}

impl GeneratorConfig {
    /// Returns a copy with unset options taken from `project`.
    ///
    /// The project's Bazel path only replaces a value that was itself
    /// inherited; explicit, saved and discovered paths are kept.
    pub fn resolving_inherited_settings(&self, project: &ProjectScope) -> Self {
        let options = self.options.inheriting_from(&project.options);
        let bazel_url = self.bazel_url.clone().reduce(Parameter::new(
            project.bazel_url.clone(),
            ProvenanceTier::FromParentProject,
        ));

        Self {
            options,
            bazel_url,
            ..self.clone()
        }
    }
}
