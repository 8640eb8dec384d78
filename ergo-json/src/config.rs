//! Serializer options and how they are loaded.
//!
//! Options can be built in code, read from an `ergo-json.yaml` file, and
//! overridden by environment variables:
//! - `ERGO_JSON_CONVERT_RESOURCES_TO_RELATIONSHIPS`
//! - `ERGO_JSON_PERMIT_RESOURCES_FOR_RELATIONSHIPS`
//! - `ERGO_JSON_DEDUPLICATE_RESOURCES`
//!
//! Overrides accept `true/false`, `1/0`, `yes/no` and `on/off`.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_CONVERT_RESOURCES: &str = "ERGO_JSON_CONVERT_RESOURCES_TO_RELATIONSHIPS";
pub const ENV_PERMIT_RESOURCES: &str = "ERGO_JSON_PERMIT_RESOURCES_FOR_RELATIONSHIPS";
pub const ENV_DEDUPLICATE: &str = "ERGO_JSON_DEDUPLICATE_RESOURCES";

/// Errors that can occur while loading options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value {value:?} for {variable}: expected a boolean")]
    InvalidOverride { variable: String, value: String },
}

/// Policies applied by [`crate::GraphSerializer`]. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerOptions {
    /// Reduce a resource found in a relationship field to its URI instead of failing.
    pub convert_resources_to_relationships: bool,

    /// Embed a resource found in a relationship field as a full object.
    pub permit_resources_for_relationships: bool,

    /// Emit each identifiable instance in full once; later encounters emit its URI.
    pub deduplicate_resources: bool,
}

impl SerializerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convert_resources_to_relationships(mut self, enabled: bool) -> Self {
        self.convert_resources_to_relationships = enabled;
        self
    }

    pub fn with_permit_resources_for_relationships(mut self, enabled: bool) -> Self {
        self.permit_resources_for_relationships = enabled;
        self
    }

    pub fn with_deduplicate_resources(mut self, enabled: bool) -> Self {
        self.deduplicate_resources = enabled;
        self
    }

    /// Whether a resource may stand in for a relationship reference.
    pub fn allows_resource_references(&self) -> bool {
        self.convert_resources_to_relationships || self.permit_resources_for_relationships
    }

    /// Load options from the default path (`./ergo-json.yaml`).
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new("ergo-json.yaml"))
    }

    /// Load options from a YAML file, then apply environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut options = Self::from_yaml_str(&content)?;
        options.apply_env_overrides()?;
        Ok(options)
    }

    /// Parse options from YAML without consulting the environment.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a map of defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `ERGO_JSON_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (ENV_CONVERT_RESOURCES, &mut self.convert_resources_to_relationships),
            (ENV_PERMIT_RESOURCES, &mut self.permit_resources_for_relationships),
            (ENV_DEDUPLICATE, &mut self.deduplicate_resources),
        ];
        for (variable, slot) in targets {
            if let Some(value) = lookup(variable) {
                *slot = parse_bool(&value).ok_or_else(|| ConfigError::InvalidOverride {
                    variable: variable.to_string(),
                    value: value.clone(),
                })?;
                tracing::debug!("{} overridden to {}", variable, *slot);
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
