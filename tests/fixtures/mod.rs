//! Test fixtures for generator config tests
//!
//! - `configs/Demo.tulsigen`: a config already in canonical saved form
//! - `configs/legacy.tulsigen`: labels, legacy include paths and a plain
//!   filesystem path in its source filters

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Directory holding the fixture configs
pub fn configs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/configs")
}

/// Path to the canonical demo config
pub fn demo_config_path() -> PathBuf {
    configs_dir().join("Demo.tulsigen")
}

/// Path to the legacy config
pub fn legacy_config_path() -> PathBuf {
    configs_dir().join("legacy.tulsigen")
}

/// Raw bytes of a fixture config
pub fn read_fixture(path: &Path) -> Vec<u8> {
    fs::read(path).expect("fixture should be readable")
}

/// A scratch directory with `name` copied in from the fixtures
pub fn scratch_copy(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let dest = dir.path().join(name);
    fs::copy(configs_dir().join(name), &dest).expect("copy fixture");
    (dir, dest)
}
