//! Reading and writing generator config documents
//!
//! Shareable document layout:
//! ```json
//! {
//!   "additionalFilePaths": ["app/BUILD"],
//!   "buildTargets": ["//app:App"],
//!   "projectName": "Demo",
//!   "sourceFilters": ["app"],
//!   "tulsi_options": {"GenerateRunfiles": {"p": "YES"}}
//! }
//! ```
//! The per-user document holds only `tulsi_options`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use tulsi_label::BuildLabel;
use tulsi_options::{OptionDictionary, OptionSet};

use super::document::{
    first_label_shaped_path, per_user_filename, GeneratorConfig, DEFAULT_PROJECT_NAME,
};
use super::error::ConfigError;
use crate::filters::normalize_path_filters;
use crate::locator::{resolve_bazel_url, BazelLocator};

const PROJECT_NAME_KEY: &str = "projectName";
const BUILD_TARGETS_KEY: &str = "buildTargets";
const PATH_FILTERS_KEY: &str = "sourceFilters";
const ADDITIONAL_FILE_PATHS_KEY: &str = "additionalFilePaths";

/// Top-level fields of a config document, each with its default applied.
struct RawConfig {
    project_name: String,
    build_targets: Vec<String>,
    source_filters: Vec<String>,
    additional_file_paths: Option<Vec<String>>,
    options: OptionDictionary,
}

impl RawConfig {
    fn from_dict(dict: &OptionDictionary) -> Self {
        Self {
            project_name: field(dict, PROJECT_NAME_KEY)
                .filter(|name: &String| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            build_targets: field(dict, BUILD_TARGETS_KEY).unwrap_or_default(),
            source_filters: field(dict, PATH_FILTERS_KEY).unwrap_or_default(),
            additional_file_paths: field(dict, ADDITIONAL_FILE_PATHS_KEY),
            options: OptionSet::options_from_container(dict).unwrap_or_default(),
        }
    }
}

/// Decode `dict[key]` as `T`; missing keys and mismatched types yield `None`.
fn field<T: DeserializeOwned>(dict: &OptionDictionary, key: &str) -> Option<T> {
    let value = dict.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(key, error = %e, "ignoring config field with unexpected type");
            None
        }
    }
}

/// Parse `data` as a JSON object, mapping failures through `error`.
fn extract_json_dict(
    data: &[u8],
    error: impl Fn(String) -> ConfigError,
) -> Result<OptionDictionary, ConfigError> {
    match serde_json::from_slice::<Value>(data) {
        Ok(Value::Object(dict)) => Ok(dict),
        Ok(_) => Err(error("Config file contents are invalid".to_string())),
        Err(e) => Err(error(e.to_string())),
    }
}

/// Pretty-printed, newline-terminated JSON with sorted keys.
fn newline_terminated_json(dict: OptionDictionary) -> Result<Vec<u8>, ConfigError> {
    let mut data = serde_json::to_vec_pretty(&Value::Object(dict))
        .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
    data.push(b'\n');
    Ok(data)
}

impl GeneratorConfig {
    /// Load a config file plus the current user's options file next to it.
    ///
    /// A missing per-user file is not an error; one that exists but cannot
    /// be read is.
    pub fn load(input_file: &Path, bazel_url: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_locator(input_file, bazel_url, &BazelLocator::new(None))
    }

    /// Like [`GeneratorConfig::load`], probing with `locator` when no Bazel
    /// path is given or saved.
    pub fn load_with_locator(
        input_file: &Path,
        bazel_url: Option<&Path>,
        locator: &BazelLocator,
    ) -> Result<Self, ConfigError> {
        let data = fs::read(input_file).map_err(|e| {
            debug!(path = %input_file.display(), error = %e, "cannot read config file");
            ConfigError::BadInputFilePath
        })?;

        let options_folder = input_file.parent().unwrap_or_else(|| Path::new(""));
        let per_user_path = options_folder.join(per_user_filename());
        let additional_option_data = read_per_user_options(&per_user_path)?;

        info!(path = %input_file.display(), "loading generator config");
        Self::from_json_with_locator(&data, additional_option_data.as_deref(), bazel_url, || {
            locator.locate()
        })
    }

    /// Decode a config document, optionally overlaid with per-user options.
    ///
    /// Discovery uses a [`BazelLocator`] over the process environment.
    pub fn from_json(
        data: &[u8],
        additional_option_data: Option<&[u8]>,
        bazel_url: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let locator = BazelLocator::new(None);
        Self::from_json_with_locator(data, additional_option_data, bazel_url, || locator.locate())
    }

    /// Decode a config document using `discover` as the last-resort Bazel
    /// lookup.
    pub fn from_json_with_locator<F>(
        data: &[u8],
        additional_option_data: Option<&[u8]>,
        bazel_url: Option<&Path>,
        discover: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        let dict = extract_json_dict(data, ConfigError::DeserializationFailed)?;
        let raw = RawConfig::from_dict(&dict);

        // `//foo/bar` is a valid filesystem path, but Xcode refuses to open a
        // project that contains one.
        if let Some(bad) = first_label_shaped_path(raw.additional_file_paths.as_deref()) {
            return Err(ConfigError::DeserializationFailed(format!(
                "Invalid additional file path: {}",
                bad
            )));
        }

        let build_target_labels: Vec<BuildLabel> =
            raw.build_targets.into_iter().map(BuildLabel::new).collect();
        for label in &build_target_labels {
            if let Err(e) = label.validate() {
                warn!(label = %label, reason = %e, "build target is not a valid label");
            }
        }

        let path_filters = normalize_path_filters(&raw.source_filters);

        let mut options = OptionSet::from_dictionary(&raw.options);
        if let Some(additional) = additional_option_data {
            let additional_dict =
                extract_json_dict(additional, ConfigError::FailedToReadAdditionalOptionsData)?;
            let new_options = OptionSet::options_from_container(&additional_dict).ok_or_else(|| {
                ConfigError::FailedToReadAdditionalOptionsData(
                    "Invalid per-user options file".to_string(),
                )
            })?;
            options = options.merge(&new_options);
        }

        let bazel_url = resolve_bazel_url(bazel_url, &options, discover).ok_or_else(|| {
            ConfigError::DeserializationFailed("Unable to find Bazel Path".to_string())
        })?;

        Ok(Self {
            project_name: raw.project_name,
            build_target_labels,
            path_filters,
            additional_file_paths: raw.additional_file_paths,
            options,
            bazel_url,
        })
    }

    /// Encode the shareable document.
    pub fn save(&self) -> Result<Vec<u8>, ConfigError> {
        let mut build_targets: Vec<&str> =
            self.build_target_labels.iter().map(BuildLabel::value).collect();
        build_targets.sort_unstable();

        let mut dict = OptionDictionary::new();
        if let Some(paths) = &self.additional_file_paths {
            dict.insert(ADDITIONAL_FILE_PATHS_KEY.to_string(), Value::from(paths.clone()));
        }
        dict.insert(BUILD_TARGETS_KEY.to_string(), Value::from(build_targets));
        dict.insert(
            PROJECT_NAME_KEY.to_string(),
            Value::String(self.project_name.clone()),
        );
        dict.insert(
            PATH_FILTERS_KEY.to_string(),
            // BTreeSet iterates in sorted order.
            Value::from_iter(self.path_filters.iter().cloned()),
        );
        self.options
            .save_shareable_into(&mut dict)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        newline_terminated_json(dict)
    }

    /// Encode the per-user document, or `None` if there are no per-user
    /// options to write.
    pub fn save_per_user_settings(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let mut dict = OptionDictionary::new();
        self.options
            .save_per_user_into(&mut dict)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        if dict.is_empty() {
            return Ok(None);
        }
        newline_terminated_json(dict).map(Some)
    }
}

fn read_per_user_options(path: &Path) -> Result<Option<Vec<u8>>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read(path).map(Some).map_err(|e| {
        debug!(path = %path.display(), error = %e, "cannot read per-user options");
        ConfigError::FailedToReadAdditionalOptionsData(format!(
            "Could not read file at path {}",
            path.display()
        ))
    })
}
