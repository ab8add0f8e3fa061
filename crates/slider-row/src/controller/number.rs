use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::{ServiceCall, number};
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const DEFAULT: Range = Range::new(0.0, 100.0, 1.0);

/// `input_number` helpers and `number` entities: the state itself is the
/// value, bounds come from the `min`/`max`/`step` attributes.
#[derive(Debug)]
pub(super) struct NumberController {
    kind: EntityKind,
}

impl NumberController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self { kind }))
    }
}

impl EntityController for NumberController {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn range(&self, state: &StateSnapshot) -> Range {
        Range::sanitized(
            state.number("min").unwrap_or(DEFAULT.min),
            state.number("max").unwrap_or(DEFAULT.max),
            state.positive_number("step").unwrap_or(DEFAULT.step),
            DEFAULT,
        )
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        state.state_number()
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        ServiceCall::new(self.kind.domain(), "set_value", entity).with("value", number(value))
    }

    fn off_state(&self) -> Option<&'static str> {
        None
    }

    fn has_toggle(&self) -> bool {
        false
    }

    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String> {
        state.state_number()?;
        let value = range.format(value);
        Some(match state.text("unit_of_measurement") {
            Some(unit) => format!("{value} {unit}"),
            None => value,
        })
    }
}
