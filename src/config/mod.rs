//! Configuration system for ImportJS
//!
//! Resolves configuration per edited file through a fallback chain:
//! 1. `.importjs.json` nearest the file (highest priority)
//! 2. `.importjs.json` in each parent directory up to the working root
//! 3. Built-in defaults (lowest priority)

mod defaults;
mod document;
mod pattern;
mod resolver;

pub use defaults::{default_document, ConfigKey, CONFIG_FILE_NAME};
pub use document::{ConfigDocument, Document, APPLIES_TO};
pub use pattern::PathPattern;
pub use resolver::{ConfigLevel, ConfigResolver, LevelSource};
