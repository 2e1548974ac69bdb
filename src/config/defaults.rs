//! Built-in default configuration
//!
//! The defaults define every recognized key, so lookups of a recognized key
//! always resolve to something.

use crate::config::document::ConfigDocument;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Name of the per-directory configuration file
pub const CONFIG_FILE_NAME: &str = ".importjs.json";

/// Recognized configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Aliases,
    DeclarationKeyword,
    EslintExecutable,
    Environments,
    Excludes,
    GroupImports,
    IgnorePackagePrefixes,
    ImportFunction,
    LookupPaths,
    MaxLineLength,
    MinimumVersion,
    NamedExports,
    StripFileExtensions,
    Tab,
    UseRelativePaths,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 15] = [
        ConfigKey::Aliases,
        ConfigKey::DeclarationKeyword,
        ConfigKey::EslintExecutable,
        ConfigKey::Environments,
        ConfigKey::Excludes,
        ConfigKey::GroupImports,
        ConfigKey::IgnorePackagePrefixes,
        ConfigKey::ImportFunction,
        ConfigKey::LookupPaths,
        ConfigKey::MaxLineLength,
        ConfigKey::MinimumVersion,
        ConfigKey::NamedExports,
        ConfigKey::StripFileExtensions,
        ConfigKey::Tab,
        ConfigKey::UseRelativePaths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Aliases => "aliases",
            ConfigKey::DeclarationKeyword => "declaration_keyword",
            ConfigKey::EslintExecutable => "eslint_executable",
            ConfigKey::Environments => "environments",
            ConfigKey::Excludes => "excludes",
            ConfigKey::GroupImports => "group_imports",
            ConfigKey::IgnorePackagePrefixes => "ignore_package_prefixes",
            ConfigKey::ImportFunction => "import_function",
            ConfigKey::LookupPaths => "lookup_paths",
            ConfigKey::MaxLineLength => "max_line_length",
            ConfigKey::MinimumVersion => "minimum_version",
            ConfigKey::NamedExports => "named_exports",
            ConfigKey::StripFileExtensions => "strip_file_extensions",
            ConfigKey::Tab => "tab",
            ConfigKey::UseRelativePaths => "use_relative_paths",
        }
    }

    /// Built-in value for this key
    pub fn default_value(&self) -> Value {
        match self {
            ConfigKey::Aliases => json!({}),
            ConfigKey::DeclarationKeyword => json!("import"),
            ConfigKey::EslintExecutable => json!("eslint"),
            ConfigKey::Environments => json!([]),
            ConfigKey::Excludes => json!([]),
            ConfigKey::GroupImports => json!(true),
            ConfigKey::IgnorePackagePrefixes => json!([]),
            ConfigKey::ImportFunction => json!("require"),
            ConfigKey::LookupPaths => json!(["."]),
            ConfigKey::MaxLineLength => json!(80),
            ConfigKey::MinimumVersion => json!("0.0.0"),
            ConfigKey::NamedExports => json!({}),
            ConfigKey::StripFileExtensions => json!([".js", ".jsx"]),
            ConfigKey::Tab => json!("  "),
            ConfigKey::UseRelativePaths => json!(false),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unrecognized configuration key '{}'", s))
    }
}

/// The default document, consulted last in every fallback chain
pub fn default_document() -> ConfigDocument {
    let values: Map<String, Value> = ConfigKey::ALL
        .iter()
        .map(|key| (key.as_str().to_string(), key.default_value()))
        .collect();
    ConfigDocument::new(values)
}
