//! Known option definitions.
//!
//! Keys not listed here are preserved and treated as shareable.

/// Where an option is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionScope {
    /// Checked into the shared `.tulsigen` file.
    Shareable,
    /// Kept in the local `<user>.tulsigen-user` file only.
    PerUser,
}

/// Static metadata for one option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDefinition {
    pub key: &'static str,
    pub scope: OptionScope,
    /// Whether `$(inherited)` inside a value expands to the parent's value.
    pub supports_inherit_keyword: bool,
    pub default: Option<&'static str>,
}

/// The keyword expanded to the parent value during inheritance.
pub const INHERITED_KEYWORD: &str = "$(inherited)";

/// Key holding the saved Bazel binary path.
pub const BAZEL_PATH: &str = "BazelPath";

/// Key holding the saved workspace root.
pub const WORKSPACE_ROOT_PATH: &str = "WorkspaceRootPath";

const fn shareable(key: &'static str, default: Option<&'static str>) -> OptionDefinition {
    OptionDefinition {
        key,
        scope: OptionScope::Shareable,
        supports_inherit_keyword: false,
        default,
    }
}

const fn inheritable(key: &'static str) -> OptionDefinition {
    OptionDefinition {
        key,
        scope: OptionScope::Shareable,
        supports_inherit_keyword: true,
        default: None,
    }
}

const fn per_user(key: &'static str) -> OptionDefinition {
    OptionDefinition {
        key,
        scope: OptionScope::PerUser,
        supports_inherit_keyword: false,
        default: None,
    }
}

pub const CATALOG: &[OptionDefinition] = &[
    shareable("ALWAYS_SEARCH_USER_PATHS", Some("NO")),
    inheritable("BazelBuildOptionsDebug"),
    inheritable("BazelBuildOptionsRelease"),
    inheritable("BazelBuildStartupOptionsDebug"),
    inheritable("BazelBuildStartupOptionsRelease"),
    shareable("BuildActionPreActionScript", None),
    shareable("CLANG_CXX_LANGUAGE_STANDARD", None),
    inheritable("CommandlineArguments"),
    shareable("DisableCustomLLDBInit", Some("NO")),
    inheritable("EnvironmentVariables"),
    shareable("GenerateRunfiles", Some("NO")),
    shareable("IncludeBuildSources", Some("NO")),
    shareable("ProjectGenerationPlatformConfiguration", Some("ios_x86_64")),
    shareable("ProjectPrioritizesSwift", Some("NO")),
    shareable("SuppressSwiftUpdateCheck", Some("YES")),
    shareable("TreeArtifactOutputs", Some("YES")),
    shareable("Use64BitWatchSimulator", Some("NO")),
    per_user(BAZEL_PATH),
    per_user(WORKSPACE_ROOT_PATH),
];

/// Look up a known option.
pub fn definition(key: &str) -> Option<&'static OptionDefinition> {
    CATALOG.iter().find(|d| d.key == key)
}

/// Persistence scope for a key; unknown keys are shareable.
pub fn scope_of(key: &str) -> OptionScope {
    definition(key).map_or(OptionScope::Shareable, |d| d.scope)
}
