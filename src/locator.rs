//! Bazel binary resolution
//!
//! Resolution order:
//! 1. A path passed in explicitly
//! 2. The `BazelPath` option saved in the config
//! 3. Discovery (workspace wrapper, `PATH`, well-known install dirs)

use std::path::{Path, PathBuf};

use tracing::debug;
use tulsi_options::{OptionSet, BAZEL_PATH};

use crate::parameter::{Parameter, ProvenanceTier};

/// Executable names searched for on `PATH`, in order.
const BAZEL_EXECUTABLES: &[&str] = &["bazel", "bazelisk"];

/// Install locations checked when nothing is found on `PATH`.
const WELL_KNOWN_LOCATIONS: &[&str] = &["/usr/local/bin/bazel", "/opt/homebrew/bin/bazel"];

/// Resolve the Bazel binary location, recording which source won.
///
/// `discover` is only invoked when neither an explicit path nor a saved
/// option is available.
pub fn resolve_bazel_url<F>(
    explicit: Option<&Path>,
    options: &OptionSet,
    discover: F,
) -> Option<Parameter<PathBuf>>
where
    F: FnOnce() -> Option<PathBuf>,
{
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using explicitly provided Bazel path");
        return Some(Parameter::new(
            path.to_path_buf(),
            ProvenanceTier::ExplicitlyProvided,
        ));
    }

    if let Some(saved) = options.value_for(BAZEL_PATH) {
        debug!(path = %saved, "using Bazel path from options");
        return Some(Parameter::new(PathBuf::from(saved), ProvenanceTier::FromOptions));
    }

    let located = discover()?;
    debug!(path = %located.display(), "using discovered Bazel path");
    Some(Parameter::new(located, ProvenanceTier::Fallback))
}

/// Probes a workspace and the environment for a Bazel binary.
#[derive(Debug, Clone)]
pub struct BazelLocator {
    workspace_root: Option<PathBuf>,
    search_path: Option<String>,
}

impl BazelLocator {
    /// Locator using the process `PATH`.
    pub fn new(workspace_root: Option<&Path>) -> Self {
        Self {
            workspace_root: workspace_root.map(Path::to_path_buf),
            search_path: std::env::var("PATH").ok(),
        }
    }

    /// Override the directories searched (same syntax as `PATH`).
    pub fn with_search_path(mut self, search_path: impl Into<String>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// First Bazel binary found, if any.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(wrapper) = self.workspace_wrapper() {
            return Some(wrapper);
        }

        let cwd = self
            .workspace_root
            .clone()
            .or_else(|| std::env::current_dir().ok());
        if let (Some(search_path), Some(cwd)) = (&self.search_path, cwd) {
            for name in BAZEL_EXECUTABLES {
                if let Ok(found) = which::which_in(name, Some(search_path), &cwd) {
                    return Some(found);
                }
            }
        }

        WELL_KNOWN_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
    }

    /// `<workspace>/tools/bazel`, the wrapper Bazel itself defers to.
    fn workspace_wrapper(&self) -> Option<PathBuf> {
        let candidate = self.workspace_root.as_ref()?.join("tools").join("bazel");
        candidate.is_file().then_some(candidate)
    }
}
