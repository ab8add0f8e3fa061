use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::{ServiceCall, number};
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

// Home Assistant's own fallbacks when an entity does not report bounds.
const CLIMATE: Range = Range::new(7.0, 35.0, 0.5);
const WATER_HEATER: Range = Range::new(110.0, 140.0, 1.0);

/// Thermostat-like devices: target temperature between `min_temp` and
/// `max_temp`. Shared by `climate` and `water_heater`.
#[derive(Debug)]
pub(super) struct ClimateController {
    kind: EntityKind,
}

impl ClimateController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self { kind }))
    }

    fn defaults(&self) -> Range {
        match self.kind {
            EntityKind::WaterHeater => WATER_HEATER,
            _ => CLIMATE,
        }
    }
}

impl EntityController for ClimateController {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn range(&self, state: &StateSnapshot) -> Range {
        let defaults = self.defaults();
        Range::sanitized(
            state.number("min_temp").unwrap_or(defaults.min),
            state.number("max_temp").unwrap_or(defaults.max),
            state
                .positive_number("target_temp_step")
                .unwrap_or(defaults.step),
            defaults,
        )
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        state.number("temperature")
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        ServiceCall::new(self.kind.domain(), "set_temperature", entity)
            .with("temperature", number(value))
    }

    fn has_toggle(&self) -> bool {
        false
    }

    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String> {
        // Range modes (heat_cool) report no single target temperature.
        state.number("temperature")?;
        let value = range.format(value);
        Some(match state.text("unit_of_measurement") {
            Some(unit) => format!("{value} {unit}"),
            None => format!("{value}°"),
        })
    }
}
