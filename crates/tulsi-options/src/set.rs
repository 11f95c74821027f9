//! The option set carried by a generator config.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{self, OptionScope, INHERITED_KEYWORD};
use crate::{OptionDictionary, PERSISTENCE_KEY};

/// Stored value of a single option.
///
/// Persisted as `{"p": <project value>, "t": {<target label>: <value>}}`,
/// both members optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Project-wide value.
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Per-target overrides keyed by label.
    #[serde(rename = "t", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, String>,

    /// Set when `project` was copied from a parent scope. Such values are
    /// never written back out.
    #[serde(skip)]
    pub project_inherited: bool,

    /// Project value as written, before `$(inherited)` was expanded. This is
    /// what gets persisted.
    #[serde(skip)]
    pub unexpanded: Option<String>,
}

impl OptionValue {
    fn is_empty(&self) -> bool {
        self.project.is_none() && self.targets.is_empty()
    }

    /// The value as it should be persisted, or `None` if nothing of it is.
    fn persisted(&self) -> Option<OptionValue> {
        let value = OptionValue {
            project: if self.project_inherited {
                None
            } else {
                self.unexpanded.clone().or_else(|| self.project.clone())
            },
            targets: self.targets.clone(),
            ..Default::default()
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Errors raised while writing options out.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Failed to serialize option '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Option key → value bag with shareable/per-user persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<String, OptionValue>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the raw options object from a config document.
    ///
    /// Returns `None` if the document has no options container or it is not
    /// a JSON object.
    pub fn options_from_container(container: &OptionDictionary) -> Option<OptionDictionary> {
        container.get(PERSISTENCE_KEY)?.as_object().cloned()
    }

    /// Build an option set from a raw options object.
    ///
    /// Entries whose value does not have the `{"p": .., "t": ..}` shape are
    /// skipped.
    pub fn from_dictionary(dict: &OptionDictionary) -> Self {
        let mut values = BTreeMap::new();
        for (key, raw) in dict {
            match serde_json::from_value::<OptionValue>(raw.clone()) {
                Ok(value) => {
                    values.insert(key.clone(), value);
                }
                Err(e) => {
                    warn!(option = %key, error = %e, "skipping malformed option value");
                }
            }
        }
        Self { values }
    }

    /// Returns a copy with `raw` laid over this set.
    ///
    /// An entry in `raw` replaces the whole entry for its key; project and
    /// target values of one option are never combined across layers.
    pub fn merge(&self, raw: &OptionDictionary) -> Self {
        let mut values = self.values.clone();
        values.extend(Self::from_dictionary(raw).values);
        Self { values }
    }

    /// Returns a copy with the project value of `key` set.
    pub fn with_project_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let entry = self.values.entry(key.into()).or_default();
        entry.project = Some(value.into());
        entry.project_inherited = false;
        entry.unexpanded = None;
        self
    }

    /// Returns a copy with a per-target override of `key` set.
    pub fn with_target_value(
        mut self,
        key: impl Into<String>,
        target: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.values
            .entry(key.into())
            .or_default()
            .targets
            .insert(target.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Effective project-wide value: the stored value, else the catalog
    /// default.
    pub fn value_for(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.project.as_deref())
            .or_else(|| catalog::definition(key).and_then(|d| d.default))
    }

    /// Effective value for one target: its override, else `value_for`.
    pub fn target_value_for(&self, key: &str, target: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.targets.get(target))
            .map(String::as_str)
            .or_else(|| self.value_for(key))
    }

    /// Whether the project value of `key` came from a parent scope.
    pub fn is_inherited(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| v.project_inherited)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy whose unset project values are taken from `parent`.
    ///
    /// Values set here are kept, except that keys supporting the
    /// `$(inherited)` keyword have it replaced with the parent's project
    /// value, or with nothing if the parent has none.
    pub fn inheriting_from(&self, parent: &OptionSet) -> Self {
        let mut values = self.values.clone();

        for (key, parent_value) in &parent.values {
            let Some(parent_project) = parent_value.project.as_deref() else {
                continue;
            };
            let entry = values.entry(key.clone()).or_default();
            if entry.project.is_none() {
                debug!(option = %key, "inheriting option from parent");
                entry.project = Some(parent_project.to_string());
                entry.project_inherited = true;
            }
        }

        for (key, entry) in values.iter_mut() {
            if entry.project_inherited
                || !catalog::definition(key).is_some_and(|d| d.supports_inherit_keyword)
            {
                continue;
            }
            let Some(own) = entry.unexpanded.clone().or_else(|| entry.project.clone()) else {
                continue;
            };
            if !own.contains(INHERITED_KEYWORD) {
                continue;
            }
            let parent_project = parent
                .values
                .get(key)
                .and_then(|v| v.project.as_deref())
                .unwrap_or_default();
            let expanded = own
                .replace(INHERITED_KEYWORD, parent_project)
                .trim()
                .to_string();
            debug!(option = %key, value = %expanded, "expanded inherited keyword");
            entry.project = Some(expanded);
            entry.unexpanded = Some(own);
        }

        values.retain(|_, v| !v.is_empty());
        Self { values }
    }

    /// Write the shareable options into `dict` under the options container
    /// key. Nothing is written if there are none.
    pub fn save_shareable_into(&self, dict: &mut OptionDictionary) -> Result<(), OptionsError> {
        self.save_into(OptionScope::Shareable, dict)
    }

    /// Write the per-user options into `dict` under the options container
    /// key. Nothing is written if there are none.
    pub fn save_per_user_into(&self, dict: &mut OptionDictionary) -> Result<(), OptionsError> {
        self.save_into(OptionScope::PerUser, dict)
    }

    fn save_into(&self, scope: OptionScope, dict: &mut OptionDictionary) -> Result<(), OptionsError> {
        let mut saved = OptionDictionary::new();
        for (key, value) in &self.values {
            if catalog::scope_of(key) != scope {
                continue;
            }
            let Some(persisted) = value.persisted() else {
                continue;
            };
            let raw = serde_json::to_value(persisted).map_err(|source| OptionsError::Serialize {
                key: key.clone(),
                source,
            })?;
            saved.insert(key.clone(), raw);
        }

        if !saved.is_empty() {
            dict.insert(PERSISTENCE_KEY.to_string(), Value::Object(saved));
        }
        Ok(())
    }
}
