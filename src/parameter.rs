//! Values tagged with the provenance tier that produced them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which resolution source produced a value.
///
/// Ordered by precedence: `ExplicitlyProvided > FromOptions > Fallback >
/// FromParentProject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvenanceTier {
    /// Inherited from the enclosing project.
    FromParentProject,
    /// Discovered by probing the workspace or the environment.
    Fallback,
    /// Read from a saved option.
    FromOptions,
    /// Passed in directly by the caller.
    ExplicitlyProvided,
}

impl fmt::Display for ProvenanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProvenanceTier::FromParentProject => "project",
            ProvenanceTier::Fallback => "fallback",
            ProvenanceTier::FromOptions => "options",
            ProvenanceTier::ExplicitlyProvided => "explicit",
        };
        f.write_str(s)
    }
}

/// A value plus the tier it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter<T> {
    pub value: T,
    pub source: ProvenanceTier,
}

impl<T> Parameter<T> {
    pub fn new(value: T, source: ProvenanceTier) -> Self {
        Self { value, source }
    }

    /// Keep `self` if it outranks a parent-project value, else take
    /// `fallback`.
    pub fn reduce(self, fallback: Parameter<T>) -> Parameter<T> {
        if self.source > ProvenanceTier::FromParentProject {
            self
        } else {
            fallback
        }
    }
}
