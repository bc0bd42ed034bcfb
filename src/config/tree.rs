//! Nested key/value configuration loaded from TOML or JSON.
//!
//! YAML is not read. Existing `.yml`/`.yaml` files keep the same nesting when
//! converted to TOML tables or JSON objects, and [`ConfigTree::load`] rejects
//! them with a parse error naming the supported formats.
//!
//! String leaves of the exact form `{VAR_NAME}` are replaced by the value of
//! that environment variable when the tree is built, or by `null` when the
//! variable is unset.

use serde_json::Value;
use std::env;
use std::path::Path;

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigTree {
    root: Value,
}

impl ConfigTree {
    pub fn from_value(mut root: Value) -> Self {
        resolve_placeholders(&mut root);
        Self { root }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, String> {
        let root: Value = toml::from_str(source).map_err(|e| e.to_string())?;
        Ok(Self::from_value(root))
    }

    pub fn from_json_str(source: &str) -> Result<Self, String> {
        let root: Value = serde_json::from_str(source).map_err(|e| e.to_string())?;
        Ok(Self::from_value(root))
    }

    /// Reads `path` as JSON when it ends in `.json`, TOML otherwise.
    /// `.yml` and `.yaml` files are refused before reading.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        if matches!(extension.as_deref(), Some("yml" | "yaml")) {
            return Err(ConfigError::ParseFailed {
                path: path.to_path_buf(),
                reason: "YAML is not supported; convert the file to TOML or JSON".to_string(),
            });
        }

        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let parsed = match extension.as_deref() {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        };

        parsed.map_err(|reason| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walks `keys` through nested tables. `None` when any key is missing;
    /// an unresolved placeholder yields `Some(Value::Null)`.
    pub fn get(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .try_fold(&self.root, |node, key| node.as_object()?.get(*key))
    }

    pub fn get_or(&self, keys: &[&str], default: Value) -> Value {
        self.get(keys).cloned().unwrap_or(default)
    }

    pub fn get_str(&self, keys: &[&str]) -> Option<&str> {
        self.get(keys)?.as_str()
    }

    /// Accepts JSON numbers and numeric strings (interpolated values are strings).
    pub fn get_u64(&self, keys: &[&str]) -> Option<u64> {
        match self.get(keys)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn resolve_placeholders(node: &mut Value) {
    match node {
        Value::Object(map) => map.values_mut().for_each(resolve_placeholders),
        Value::Array(items) => items.iter_mut().for_each(resolve_placeholders),
        Value::String(s) => {
            let resolved = placeholder_name(s)
                .map(|name| env::var(name).map(Value::String).unwrap_or(Value::Null));
            if let Some(value) = resolved {
                *node = value;
            }
        }
        _ => {}
    }
}

fn placeholder_name(value: &str) -> Option<&str> {
    let name = value.strip_prefix('{')?.strip_suffix('}')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}
