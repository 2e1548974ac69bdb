//! Configuration documents as they appear in `.importjs.json`

use crate::config::pattern::PathPattern;
use crate::types::{ConfigError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Reserved key scoping an entry to a subset of files
pub const APPLIES_TO: &str = "applies_to";

/// A single key -> value mapping, optionally scoped by `applies_to`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    applies_to: Option<String>,
    values: Map<String, Value>,
}

impl ConfigDocument {
    pub fn new(mut values: Map<String, Value>) -> Self {
        let applies_to = match values.remove(APPLIES_TO) {
            Some(Value::String(pattern)) => Some(pattern),
            Some(other) => {
                warn!("Ignoring non-string {} value: {}", APPLIES_TO, other);
                None
            }
            None => None,
        };

        Self { applies_to, values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn applies_to(&self) -> Option<&str> {
        self.applies_to.as_deref()
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Whether this entry applies to a file at `relative_path`
    ///
    /// Unscoped entries always apply. Scoped entries never apply when there
    /// is no file, or when the pattern does not compile.
    pub fn applies_to_path(&self, relative_path: Option<&str>) -> bool {
        let Some(pattern) = &self.applies_to else {
            return true;
        };
        let Some(relative_path) = relative_path else {
            return false;
        };

        match PathPattern::new(pattern) {
            Ok(compiled) => compiled.matches(relative_path),
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}

/// The parsed contents of one configuration file
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A JSON object, applied as-is
    Single(ConfigDocument),
    /// A JSON array of entries in priority order
    Many(Vec<ConfigDocument>),
}

impl Document {
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Document::Single(map.into())),
            Value::Array(items) => {
                let entries = items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, item)| match item {
                        Value::Object(map) => Some(ConfigDocument::from(map)),
                        other => {
                            warn!("Skipping non-object configuration entry #{}: {}", index, other);
                            None
                        }
                    })
                    .collect();
                Ok(Document::Many(entries))
            }
            other => Err(format!(
                "expected an object or an array of objects, found {}",
                json_type_name(&other)
            )),
        }
    }

    /// Read and parse a configuration file
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            debug!("No configuration file at {}", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map(Some)
            .map_err(|reason| ConfigError::MalformedDocument(path.to_path_buf(), reason))
    }

    /// Entries that apply to `relative_path`, most specific first
    pub fn select(self, relative_path: Option<&str>) -> Vec<ConfigDocument> {
        match self {
            Document::Single(doc) => vec![doc],
            Document::Many(entries) => entries
                .into_iter()
                .filter(|entry| entry.applies_to_path(relative_path))
                .collect(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
