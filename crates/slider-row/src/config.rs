use serde::{Deserialize, Serialize};

use crate::coupling::CouplingRule;
use crate::error::ConfigError;

/// Row configuration as written in the Lovelace dashboard YAML.
///
/// Keys the row chrome consumes (`name`, `icon`, ...) are ignored here and
/// passed through untouched by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowConfig {
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub toggle: bool,
    #[serde(default)]
    pub hide_when_off: bool,
    /// `Some(false)` always shows the value, `Some(true)` never does,
    /// `None` lets the available width decide.
    #[serde(default)]
    pub hide_state: Option<bool>,
    #[serde(default)]
    pub full_row: bool,
    #[serde(default)]
    pub grow: bool,
    /// Attribute mode for kinds that can drive more than one attribute.
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    /// Replaces the built-in coupling table for this row.
    #[serde(default)]
    pub coupling: Option<Vec<CouplingRule>>,
}

impl RowConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::InvalidConfig)
    }

    /// The configured entity id, or `MissingEntity` when absent or blank.
    pub fn entity(&self) -> Result<&str, ConfigError> {
        match self.entity.as_deref().map(str::trim) {
            Some(entity) if !entity.is_empty() => Ok(entity),
            _ => Err(ConfigError::MissingEntity),
        }
    }
}
