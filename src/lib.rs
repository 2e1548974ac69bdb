//! ImportJS configuration core
//!
//! Answers "which declaration keyword, aliases and import function apply to
//! this file?" by merging `.importjs.json` files found between the working
//! root and the edited file, and extracts the runtime dependencies declared
//! in the project's `package.json`.

pub mod config;
pub mod manifest;
pub mod types;
pub mod utils;

pub use config::{ConfigKey, ConfigResolver};
pub use manifest::PackageManifest;
pub use types::ConfigError;
