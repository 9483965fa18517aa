//! Settings for context index resolution.
//!
//! Layered config: defaults -> config file -> env vars.
//! The default config file lives at `<config dir>/context-index/config.{toml,json,yaml}`.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ContextIndexError;
use crate::index_type::{IndexType, IndexTypeRegistry};

/// Setting key naming the implementation type preferred on rank ties.
pub const DEFAULT_INDEX_TYPE_SETTING: &str = "ContentSearch.DefaultIndexType";

/// Read access to host settings.
pub trait SettingsProvider: Send + Sync {
    /// Value of `key`, or `default` when the setting is absent.
    fn get_setting(&self, key: &str, default: &str) -> String;
}

impl SettingsProvider for HashMap<String, String> {
    fn get_setting(&self, key: &str, default: &str) -> String {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Implementation type preferred when candidate ranks tie.
    /// Empty means no preference.
    #[serde(default)]
    pub default_index_type: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extra names for index types, e.g. `primary = "solr"`.
    /// Matched ignoring case.
    #[serde(default)]
    pub type_aliases: HashMap<String, IndexType>,

    /// Free-form host settings served through [`SettingsProvider`].
    /// Keys loaded from files arrive lowercased, so lookups fall back to
    /// the lowercased key.
    #[serde(default)]
    pub settings: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            default_index_type: String::new(),
            log_level: default_log_level(),
            type_aliases: HashMap::new(),
            settings: HashMap::new(),
        }
    }
}

impl ResolverSettings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Default config file (optional)
    /// 3. Explicit config file (required when given)
    /// 4. Environment variables (`CONTEXT_INDEX_*`, `__` separates nested keys)
    pub fn load(config_path: Option<&str>) -> Result<Self, ContextIndexError> {
        let mut builder = Config::builder()
            .set_default("default_index_type", "")?
            .set_default("log_level", default_log_level())?
            .add_source(File::with_name(&default_config_path().to_string_lossy()).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CONTEXT_INDEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: ResolverSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ContextIndexError> {
        if let Some(name) = self.type_aliases.keys().find(|name| name.trim().is_empty()) {
            return Err(ContextIndexError::Config(format!(
                "type alias name must not be empty, got {:?}",
                name
            )));
        }
        Ok(())
    }

    /// Builtin type names plus the configured aliases.
    pub fn type_registry(&self) -> IndexTypeRegistry {
        let mut registry = IndexTypeRegistry::with_builtin();
        // Sorted so colliding names (after folding) register in a fixed order
        let mut aliases: Vec<_> = self.type_aliases.iter().collect();
        aliases.sort();
        for (name, index_type) in aliases {
            registry.register_folded(name, *index_type);
        }
        registry
    }

    fn table_setting(&self, key: &str) -> Option<&String> {
        self.settings
            .get(key)
            .or_else(|| self.settings.get(&key.to_lowercase()))
    }
}

impl SettingsProvider for ResolverSettings {
    fn get_setting(&self, key: &str, default: &str) -> String {
        if key == DEFAULT_INDEX_TYPE_SETTING && !self.default_index_type.is_empty() {
            return self.default_index_type.clone();
        }
        self.table_setting(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "context-index")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config")
}
