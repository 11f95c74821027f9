//! Source filter normalization.
//!
//! Source filters may be written as labels (`//foo/bar:target`) or as
//! package paths (`foo/bar`). Both are reduced to the package path.

use std::collections::BTreeSet;

use tracing::debug;
use tulsi_label::BuildLabel;

/// Location of generated includes in projects written by older releases.
pub const LEGACY_INCLUDES_PATH: &str = "_tulsi-includes/x/x/";

/// Current location of generated includes.
pub const INCLUDES_PATH: &str = "bazel-tulsi-includes/x/x/";

/// Reduce raw filter strings to a set of package paths.
///
/// Entries that do not parse as a label are dropped, as are labels in the
/// root package since an empty path does not name a filter.
pub fn normalize_path_filters<I, S>(raw_filters: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut filters = BTreeSet::new();
    for raw in raw_filters {
        let raw = raw.as_ref();
        let rewritten = raw.replace(LEGACY_INCLUDES_PATH, INCLUDES_PATH);
        match BuildLabel::new(rewritten).parts() {
            Ok(parts) if !parts.package.is_empty() => {
                filters.insert(parts.package);
            }
            Ok(_) => {
                debug!(filter = %raw, "dropping root package source filter");
            }
            Err(e) => {
                debug!(filter = %raw, reason = %e, "dropping source filter");
            }
        }
    }
    filters
}
