//! Page configuration
//!
//! Loaded from YAML or JSON, optionally overlaid with `PAGEAREA_*`
//! environment variables.

use crate::result::{AreaError, AreaResult};
use crate::selector::{FormElementPath, DEFAULT_PATH_ATTRIBUTE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`AreaConfig::path_attribute`]
pub const PATH_ATTRIBUTE_ENV: &str = "PAGEAREA_PATH_ATTRIBUTE";

/// Environment variable overriding [`AreaConfig::root_path`]
pub const ROOT_PATH_ENV: &str = "PAGEAREA_ROOT_PATH";

/// Environment variable overriding [`AreaConfig::log_filter`]
pub const LOG_ENV: &str = "PAGEAREA_LOG";

/// Configuration shared by every page built from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Attribute carrying the logical form path of each input
    pub path_attribute: String,
    /// Path of the page's root area
    pub root_path: String,
    /// `tracing` filter directive used when `PAGEAREA_LOG` is unset
    pub log_filter: String,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            path_attribute: DEFAULT_PATH_ATTRIBUTE.to_string(),
            root_path: String::new(),
            log_filter: "info".to_string(),
        }
    }
}

impl AreaConfig {
    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path attribute
    #[must_use]
    pub fn with_path_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.path_attribute = attribute.into();
        self
    }

    /// Set the root path
    #[must_use]
    pub fn with_root_path(mut self, path: impl Into<String>) -> Self {
        self.root_path = path.into();
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse from YAML
    pub fn from_yaml_str(content: &str) -> AreaResult<Self> {
        let config: Self = serde_yaml_ng::from_str(content)?;
        config.validate()
    }

    /// Parse from JSON
    pub fn from_json_str(content: &str) -> AreaResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> AreaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(AreaError::config(format!(
                "unsupported config extension {other:?} for {}",
                path.display()
            ))),
        }
    }

    /// Overlay values from `PAGEAREA_*` environment variables
    pub fn with_env_overrides(self) -> AreaResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> AreaResult<Self> {
        if let Some(attribute) = lookup(PATH_ATTRIBUTE_ENV) {
            self.path_attribute = attribute;
        }
        if let Some(root) = lookup(ROOT_PATH_ENV) {
            self.root_path = root;
        }
        if let Some(filter) = lookup(LOG_ENV) {
            self.log_filter = filter;
        }
        self.validate()
    }

    /// Check the config for values no page could work with
    pub fn validate(self) -> AreaResult<Self> {
        let attribute = self.path_attribute.as_str();
        let valid_attribute = !attribute.is_empty()
            && attribute
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'));
        if !valid_attribute {
            return Err(AreaError::config(format!(
                "invalid path attribute {attribute:?}"
            )));
        }
        if self.root_path.starts_with('/') {
            return Err(AreaError::config(format!(
                "root path {:?} must not start with '/'",
                self.root_path
            )));
        }
        Ok(self)
    }

    /// The selector convention this config describes
    #[must_use]
    pub fn convention(&self) -> FormElementPath {
        FormElementPath::new(&self.path_attribute)
    }
}
