use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, IoContext, Result};

/// Per-machine file holding paths that are not checked into source control.
pub const ENV_LOCAL_FILE: &str = "env.local.yaml";

/// Variable name a config key is exported under.
///
/// Variable names are compared case-insensitively, so the name is upper-cased.
pub fn normalize_key(key: &str) -> String {
    key.replace('-', "_").to_ascii_uppercase()
}

/// Flat key/value pairs from `env.local.yaml`, file order kept, last duplicate wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct EnvEntries(Vec<(String, String)>);

impl EnvEntries {
    fn insert(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl<'de> Deserialize<'de> for EnvEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = EnvEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a flat mapping of string keys to string values")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(EnvEntries::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = EnvEntries::default();
                while let Some(key) = map.next_key::<serde_yaml::Value>()? {
                    let key = scalar_to_string(key).map_err(serde::de::Error::custom)?;
                    let value = map.next_value::<serde_yaml::Value>()?;
                    let value = scalar_to_string(value).map_err(|message| {
                        serde::de::Error::custom(format!("key '{key}': {message}"))
                    })?;
                    entries.insert(key, value);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

fn scalar_to_string(value: serde_yaml::Value) -> std::result::Result<String, String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err("nested values are not supported".to_string())
        }
    }
}

/// Local environment configuration resolved against the external environment.
///
/// Values from `env.local.yaml` are exported under their normalized names
/// (`opengfd-path` becomes `OPENGFD_PATH`). A variable that is already set
/// externally keeps its value unless it is empty or just repeats its own name.
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: PathBuf,
    entries: EnvEntries,
    external: HashMap<String, String>,
    exports: Vec<(String, String)>,
}

impl EnvStore {
    /// Load `env.local.yaml` from `root` against the current process environment.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_with(root, env::vars().collect())
    }

    pub fn load_with(root: &Path, external: HashMap<String, String>) -> Result<Self> {
        let path = root.join(ENV_LOCAL_FILE);
        if !path.is_file() {
            return Err(Error::MissingLocalConfig {
                file: ENV_LOCAL_FILE,
                root: root.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(&path).at(&path)?;
        let entries: EnvEntries = if contents.trim().is_empty() {
            EnvEntries::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|err| Error::InvalidLocalConfig {
                path: path.clone(),
                message: err.to_string(),
            })?
        };

        let mut store = Self {
            path,
            entries: EnvEntries::default(),
            external,
            exports: Vec::new(),
        };
        for (key, value) in entries.0 {
            store.set(&key, &value)?;
        }
        Ok(store)
    }

    /// Path of the file this store was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Effective value for a key declared in `env.local.yaml`.
    pub fn get(&self, key: &str) -> Result<&str> {
        let (_, file_value) = self
            .entries
            .0
            .iter()
            .find(|(existing, _)| existing == key)
            .ok_or_else(|| Error::MissingValue {
                key: key.to_string(),
            })?;

        let name = normalize_key(key);
        Ok(self
            .external_override(&name)
            .unwrap_or(file_value.as_str()))
    }

    /// Add a new entry. Existing keys are never replaced.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.entries.0.iter().any(|(existing, _)| existing == key) {
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.entries.0.push((key.to_string(), value.to_string()));

        let name = normalize_key(key);
        if self.external_override(&name).is_some() {
            debug!(variable = %name, "keeping externally set value");
        } else {
            debug!(variable = %name, "exporting value from {}", ENV_LOCAL_FILE);
            self.exports.retain(|(existing, _)| *existing != name);
            self.exports.push((name, value.to_string()));
        }
        Ok(())
    }

    /// Look up a variable, preferring external values over exported ones.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.external_override(name).or_else(|| {
            self.exports
                .iter()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }

    /// Look up a variable set outside of `env.local.yaml`.
    pub fn external_var(&self, name: &str) -> Option<&str> {
        self.external
            .get(name)
            .or_else(|| {
                self.external
                    .iter()
                    .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Variables contributed by `env.local.yaml`, in file order.
    pub fn exports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exports
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Keys declared in `env.local.yaml`, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.0.iter().map(|(key, _)| key.as_str())
    }

    fn external_override(&self, name: &str) -> Option<&str> {
        self.external_var(name)
            .filter(|value| !value.eq_ignore_ascii_case(name))
    }
}
