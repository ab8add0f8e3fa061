use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::{ServiceCall, number};
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const PERCENTAGE: Range = Range::new(0.0, 100.0, 1.0);

/// Fans: speed percentage, stepped by the fan's `percentage_step`.
#[derive(Debug)]
pub(super) struct FanController;

impl FanController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self))
    }
}

impl EntityController for FanController {
    fn kind(&self) -> EntityKind {
        EntityKind::Fan
    }

    fn range(&self, state: &StateSnapshot) -> Range {
        Range {
            step: state
                .positive_number("percentage_step")
                .unwrap_or(PERCENTAGE.step),
            ..PERCENTAGE
        }
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        if state.state == "off" {
            return Some(0.0);
        }
        state.number("percentage")
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        if value == 0.0 {
            return ServiceCall::new("fan", "turn_off", entity);
        }
        ServiceCall::new("fan", "set_percentage", entity).with("percentage", number(value))
    }

    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String> {
        if state.state == "off" {
            return None;
        }
        Some(format!("{} %", range.format(value)))
    }
}
