use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// The state token Home Assistant reports for entities it cannot reach.
pub const UNAVAILABLE: &str = "unavailable";

/// A `<kind>.<instance>` entity identifier, e.g. `light.kitchen`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    raw: String,
    dot: usize,
}

impl EntityId {
    /// Parse an entity id. The kind (everything before the first dot) and the
    /// instance name must both be non-empty.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        match raw.find('.') {
            Some(dot) if dot > 0 && dot + 1 < raw.len() => Ok(Self {
                raw: raw.to_string(),
                dot,
            }),
            _ => Err(ConfigError::MalformedEntityId(raw.to_string())),
        }
    }

    /// The dispatch discriminator, e.g. `cover` for `cover.shutter_5`.
    pub fn kind(&self) -> &str {
        &self.raw[..self.dot]
    }

    /// The instance name, e.g. `shutter_5` for `cover.shutter_5`.
    pub fn instance(&self) -> &str {
        &self.raw[self.dot + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A point-in-time view of one entity, as found in `hass.states[entity_id]`.
///
/// Extra fields of the HA state object (`last_changed`, `context`, ...) are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl StateSnapshot {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute insertion, mostly used by hosts and tests.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_unavailable(&self) -> bool {
        self.state == UNAVAILABLE
    }

    /// Read a numeric attribute. Numbers and numeric strings are accepted;
    /// anything else (absent, bool, list, garbage text) yields `None`.
    pub fn number(&self, name: &str) -> Option<f64> {
        let value = self.attributes.get(name)?;
        let number = value_as_f64(value);
        if number.is_none() {
            tracing::trace!(attribute = name, ?value, "ignoring non-numeric attribute");
        }
        number
    }

    /// Read a numeric attribute that must be strictly positive (a step size).
    pub fn positive_number(&self, name: &str) -> Option<f64> {
        self.number(name).filter(|n| *n > 0.0 && n.is_finite())
    }

    /// Read element `index` of a numeric list attribute such as `hs_color`.
    pub fn list_number(&self, name: &str, index: usize) -> Option<f64> {
        self.attributes
            .get(name)?
            .as_array()?
            .get(index)
            .and_then(value_as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Read a list of strings. Non-string entries stay in place as `None`
    /// so positions match the raw list.
    pub fn strings(&self, name: &str) -> Vec<Option<&str>> {
        match self.attributes.get(name).and_then(Value::as_array) {
            Some(items) => items.iter().map(Value::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// The primary state token parsed as a number (`input_number`, `number`).
    pub fn state_number(&self) -> Option<f64> {
        self.state.trim().parse().ok()
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_id() {
        let id = EntityId::parse("cover.shutter_5").unwrap();
        assert_eq!(id.kind(), "cover");
        assert_eq!(id.instance(), "shutter_5");
        assert_eq!(id.to_string(), "cover.shutter_5");
    }

    #[test]
    fn test_parse_entity_id_keeps_later_dots() {
        let id = EntityId::parse("sensor.outdoor.temp").unwrap();
        assert_eq!(id.kind(), "sensor");
        assert_eq!(id.instance(), "outdoor.temp");
    }

    #[test]
    fn test_parse_entity_id_rejects_missing_parts() {
        assert!(matches!(
            EntityId::parse(".kitchen"),
            Err(ConfigError::MalformedEntityId(_))
        ));
        assert!(EntityId::parse("light.").is_err());
        assert!(EntityId::parse("light").is_err());
        assert!(EntityId::parse("").is_err());
    }

    #[test]
    fn test_snapshot_ignores_extra_fields() {
        let json = r#"{
            "entity_id": "light.kitchen",
            "state": "on",
            "attributes": {"brightness": 128},
            "last_changed": "2024-01-15T10:30:00Z"
        }"#;
        let snapshot: StateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.state, "on");
        assert_eq!(snapshot.number("brightness"), Some(128.0));
    }

    #[test]
    fn test_snapshot_attributes_default_to_empty() {
        let snapshot: StateSnapshot = serde_json::from_str(r#"{"state": "off"}"#).unwrap();
        assert!(snapshot.attributes.is_empty());
    }

    #[test]
    fn test_number_accepts_numeric_strings_only() {
        let snapshot = StateSnapshot::new("on")
            .with_attribute("a", 12.5)
            .with_attribute("b", " 40 ")
            .with_attribute("c", "bright")
            .with_attribute("d", true)
            .with_attribute("e", serde_json::json!([1, 2]));
        assert_eq!(snapshot.number("a"), Some(12.5));
        assert_eq!(snapshot.number("b"), Some(40.0));
        assert_eq!(snapshot.number("c"), None);
        assert_eq!(snapshot.number("d"), None);
        assert_eq!(snapshot.number("e"), None);
        assert_eq!(snapshot.number("missing"), None);
    }

    #[test]
    fn test_strings_keep_positions() {
        let snapshot =
            StateSnapshot::new("a").with_attribute("options", serde_json::json!(["a", 1, "b"]));
        assert_eq!(snapshot.strings("options"), vec![Some("a"), None, Some("b")]);
        assert!(snapshot.strings("missing").is_empty());
    }

    #[test]
    fn test_list_number() {
        let snapshot =
            StateSnapshot::new("on").with_attribute("hs_color", serde_json::json!([30.5, 80]));
        assert_eq!(snapshot.list_number("hs_color", 0), Some(30.5));
        assert_eq!(snapshot.list_number("hs_color", 1), Some(80.0));
        assert_eq!(snapshot.list_number("hs_color", 2), None);
    }

    #[test]
    fn test_positive_number_rejects_zero_step() {
        let snapshot = StateSnapshot::new("on")
            .with_attribute("step", 0)
            .with_attribute("other_step", 0.5);
        assert_eq!(snapshot.positive_number("step"), None);
        assert_eq!(snapshot.positive_number("other_step"), Some(0.5));
    }

    #[test]
    fn test_unavailable() {
        assert!(StateSnapshot::new(UNAVAILABLE).is_unavailable());
        assert!(!StateSnapshot::new("off").is_unavailable());
    }
}
