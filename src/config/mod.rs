// src/config/mod.rs

//! Step-file configuration.
//!
//! - [`model`] holds the raw TOML shape and the validated types.
//! - [`loader`] reads a file from disk.
//! - [`validate`] turns a [`RawConfigFile`] into a [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, RawStep, Step, StepAction, StepKind};
