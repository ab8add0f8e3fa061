use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::EntityId;

/// A write request for the host: `hass.callService(domain, service, data)`.
///
/// Controllers only build these. Dispatching is fire-and-forget on the host
/// side; the next state snapshot tells us whether it took effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Map<String, Value>,
}

impl ServiceCall {
    /// A service call targeting one entity (`data.entity_id` is filled in).
    pub fn new(domain: impl Into<String>, service: impl Into<String>, entity: &EntityId) -> Self {
        let mut data = Map::new();
        data.insert("entity_id".into(), entity.as_str().into());
        Self {
            domain: domain.into(),
            service: service.into(),
            data,
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// A JSON number for a service field: integral values are sent as integers,
/// which integrations such as `light.turn_on {brightness}` insist on.
pub fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
