//! Per-file configuration resolution with per-key fallback
//!
//! Priority order (highest to lowest):
//! 1. `.importjs.json` in the edited file's directory
//! 2. `.importjs.json` in each parent directory, up to the working root
//! 3. Built-in defaults
//!
//! Each key is resolved independently: a level that does not define a key
//! is skipped for that key only.

use crate::config::defaults::{default_document, ConfigKey, CONFIG_FILE_NAME};
use crate::config::document::{ConfigDocument, Document};
use crate::config::pattern::to_posix;
use crate::manifest;
use path_clean::PathClean;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a level came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for LevelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelSource::File(path) => write!(f, "{}", path.display()),
            LevelSource::Defaults => f.write_str("<defaults>"),
        }
    }
}

/// Resolve symlinks through the deepest existing ancestor of `path`
///
/// The non-existent remainder is appended unchanged, so the root and the
/// edited file end up comparable even when the file has not been created.
fn resolve_existing(path: &Path) -> PathBuf {
    let path = path.clean();
    for ancestor in path.ancestors() {
        let Ok(resolved) = ancestor.canonicalize() else {
            continue;
        };
        if let Ok(rest) = path.strip_prefix(ancestor) {
            return if rest.as_os_str().is_empty() {
                resolved
            } else {
                resolved.join(rest)
            };
        }
    }
    path
}

/// One entry of the fallback chain
#[derive(Debug, Clone)]
pub struct ConfigLevel {
    pub source: LevelSource,
    pub document: ConfigDocument,
}

/// Effective configuration for one edited file
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    /// Working root; the manifest and the outermost config live here
    root: PathBuf,

    /// Absolute, normalized path of the edited file, if any
    current_file: Option<PathBuf>,

    /// Fallback chain, most specific first, defaults last
    levels: Vec<ConfigLevel>,
}

impl ConfigResolver {
    /// Resolve configuration for `current_file` relative to the process
    /// working directory
    pub fn new(current_file: impl AsRef<Path>) -> Self {
        let root = std::env::current_dir().unwrap_or_else(|e| {
            warn!("Cannot determine working directory, using '.': {}", e);
            PathBuf::from(".")
        });
        Self::with_root(root, current_file)
    }

    /// Resolve configuration for `current_file` under an explicit root
    pub fn with_root(root: impl AsRef<Path>, current_file: impl AsRef<Path>) -> Self {
        let root = resolve_existing(root.as_ref());
        let current_file = current_file.as_ref();
        let current_file = if current_file.as_os_str().is_empty() {
            None
        } else {
            let file = root.join(current_file).clean();
            Some(match (file.parent(), file.file_name()) {
                (Some(parent), Some(name)) => resolve_existing(parent).join(name),
                _ => file,
            })
        };

        let levels = Self::discover(&root, current_file.as_deref());
        info!(
            "Resolved {} configuration level(s) for {}",
            levels.len(),
            current_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<no file>".to_string())
        );

        Self {
            root,
            current_file,
            levels,
        }
    }

    /// Build the fallback chain from the file's directory up to the root
    fn discover(root: &Path, current_file: Option<&Path>) -> Vec<ConfigLevel> {
        let relative_file = current_file.and_then(|file| file.strip_prefix(root).ok());
        if current_file.is_some() && relative_file.is_none() {
            debug!("Edited file is outside {}, using root level only", root.display());
        }

        // Directories relative to the root, nearest first; "" is the root itself
        let directories: Vec<&Path> = match relative_file.and_then(Path::parent) {
            Some(parent) => parent.ancestors().collect(),
            None => vec![Path::new("")],
        };

        let mut levels = Vec::new();
        for directory in directories {
            let config_path = root.join(directory).join(CONFIG_FILE_NAME);
            let Some(document) = Self::load_level(&config_path) else {
                continue;
            };

            let pattern_path = relative_file
                .and_then(|file| file.strip_prefix(directory).ok())
                .map(to_posix);

            for entry in document.select(pattern_path.as_deref()) {
                debug!(
                    "Using configuration entry from {} (applies_to: {:?})",
                    config_path.display(),
                    entry.applies_to()
                );
                levels.push(ConfigLevel {
                    source: LevelSource::File(config_path.clone()),
                    document: entry,
                });
            }
        }

        levels.push(ConfigLevel {
            source: LevelSource::Defaults,
            document: default_document(),
        });
        levels
    }

    /// Load one configuration file; any failure makes the level empty
    fn load_level(path: &Path) -> Option<Document> {
        match Document::load(path) {
            Ok(document) => document,
            Err(e) => {
                warn!("Ignoring configuration file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Value for `key` from the first level that defines it
    ///
    /// Recognized keys always resolve; `None` means no level defines `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.lookup(key).map(|(_, value)| value)
    }

    /// Value for a recognized key
    pub fn value(&self, key: ConfigKey) -> &Value {
        match self.get(key.as_str()) {
            Some(value) => value,
            None => unreachable!("defaults define every recognized key"),
        }
    }

    /// The level that supplied `key`
    pub fn source_of(&self, key: &str) -> Option<&LevelSource> {
        self.lookup(key).map(|(source, _)| source)
    }

    fn lookup(&self, key: &str) -> Option<(&LevelSource, &Value)> {
        self.levels
            .iter()
            .find_map(|level| level.document.get(key).map(|value| (&level.source, value)))
    }

    /// Every recognized key with its effective value
    pub fn effective(&self) -> Map<String, Value> {
        ConfigKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), self.value(*key).clone()))
            .collect()
    }

    pub fn levels(&self) -> &[ConfigLevel] {
        &self.levels
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Runtime dependency names declared in the root `package.json`
    pub fn package_dependencies(&self) -> Vec<String> {
        manifest::package_dependencies(&self.root)
    }

    // Typed accessors. A value of the wrong type falls back to the default.

    fn string_or_default(&self, key: ConfigKey) -> String {
        self.value(key)
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| {
                warn!("Expected a string for '{}', using default", key);
                key.default_value().as_str().unwrap_or_default().to_string()
            })
    }

    fn strings_or_default(&self, key: ConfigKey) -> Vec<String> {
        fn strings(value: &Value) -> Option<Vec<String>> {
            value
                .as_array()?
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect()
        }

        strings(self.value(key)).unwrap_or_else(|| {
            warn!("Expected a list of strings for '{}', using default", key);
            strings(&key.default_value()).unwrap_or_default()
        })
    }

    fn bool_or_default(&self, key: ConfigKey) -> bool {
        self.value(key)
            .as_bool()
            .or_else(|| key.default_value().as_bool())
            .unwrap_or_default()
    }

    fn object_or_empty(&self, key: ConfigKey) -> Map<String, Value> {
        self.value(key).as_object().cloned().unwrap_or_default()
    }

    pub fn declaration_keyword(&self) -> String {
        self.string_or_default(ConfigKey::DeclarationKeyword)
    }

    pub fn import_function(&self) -> String {
        self.string_or_default(ConfigKey::ImportFunction)
    }

    pub fn eslint_executable(&self) -> String {
        self.string_or_default(ConfigKey::EslintExecutable)
    }

    pub fn tab(&self) -> String {
        self.string_or_default(ConfigKey::Tab)
    }

    pub fn aliases(&self) -> Map<String, Value> {
        self.object_or_empty(ConfigKey::Aliases)
    }

    pub fn named_exports(&self) -> Map<String, Value> {
        self.object_or_empty(ConfigKey::NamedExports)
    }

    pub fn environments(&self) -> Vec<String> {
        self.strings_or_default(ConfigKey::Environments)
    }

    pub fn excludes(&self) -> Vec<String> {
        self.strings_or_default(ConfigKey::Excludes)
    }

    pub fn lookup_paths(&self) -> Vec<String> {
        self.strings_or_default(ConfigKey::LookupPaths)
    }

    pub fn strip_file_extensions(&self) -> Vec<String> {
        self.strings_or_default(ConfigKey::StripFileExtensions)
    }

    pub fn ignore_package_prefixes(&self) -> Vec<String> {
        self.strings_or_default(ConfigKey::IgnorePackagePrefixes)
    }

    pub fn group_imports(&self) -> bool {
        self.bool_or_default(ConfigKey::GroupImports)
    }

    pub fn use_relative_paths(&self) -> bool {
        self.bool_or_default(ConfigKey::UseRelativePaths)
    }

    pub fn max_line_length(&self) -> u64 {
        self.value(ConfigKey::MaxLineLength)
            .as_u64()
            .or_else(|| ConfigKey::MaxLineLength.default_value().as_u64())
            .unwrap_or_default()
    }

    /// Target path for an alias, with `{filename}` expanded
    ///
    /// The alias may map to a string or to an object with a `path` string.
    pub fn resolve_alias(&self, name: &str) -> Option<String> {
        let aliases = self.aliases();
        let target = match aliases.get(name)? {
            Value::String(path) => path.clone(),
            Value::Object(entry) => entry.get("path")?.as_str()?.to_string(),
            other => {
                warn!("Ignoring alias '{}' with unsupported value {}", name, other);
                return None;
            }
        };

        let stem = self
            .current_file
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned());

        Some(match stem {
            Some(stem) => target.replacen("{filename}", &stem, 1),
            None => target,
        })
    }

    /// Named exports configured for `module`
    pub fn named_exports_for(&self, module: &str) -> Vec<String> {
        self.named_exports()
            .get(module)
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
