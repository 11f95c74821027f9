//! Generator configuration
//!
//! A config names the Bazel targets and source filters an Xcode project is
//! generated from. It is stored as two JSON documents:
//! 1. `<project>.tulsigen`, shareable, checked in
//! 2. `<user>.tulsigen-user`, per-user options, kept local

mod codec;
mod document;
mod error;
mod inherit;

pub use document::{
    per_user_filename, sanitize_filename, GeneratorConfig, DEFAULT_PROJECT_NAME, FILE_EXTENSION,
};
pub use error::ConfigError;
pub use inherit::ProjectScope;
