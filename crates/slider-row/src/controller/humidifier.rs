use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::{ServiceCall, number};
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const HUMIDITY: Range = Range::new(0.0, 100.0, 1.0);

/// Humidifiers and dehumidifiers: target humidity in percent.
#[derive(Debug)]
pub(super) struct HumidifierController;

impl HumidifierController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self))
    }
}

impl EntityController for HumidifierController {
    fn kind(&self) -> EntityKind {
        EntityKind::Humidifier
    }

    fn range(&self, state: &StateSnapshot) -> Range {
        Range::sanitized(
            state.number("min_humidity").unwrap_or(HUMIDITY.min),
            state.number("max_humidity").unwrap_or(HUMIDITY.max),
            HUMIDITY.step,
            HUMIDITY,
        )
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        state.number("humidity")
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        ServiceCall::new("humidifier", "set_humidity", entity).with("humidity", number(value))
    }

    fn format(&self, value: f64, range: &Range, _state: &StateSnapshot) -> Option<String> {
        Some(format!("{} %", range.format(value)))
    }
}
