use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::ServiceCall;
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const ON_OFF: Range = Range::new(0.0, 1.0, 1.0);

/// Plain on/off entities. No slider; the value is 1 while on.
#[derive(Debug)]
pub(super) struct SwitchController {
    kind: EntityKind,
}

impl SwitchController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self { kind }))
    }
}

impl EntityController for SwitchController {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn range(&self, _state: &StateSnapshot) -> Range {
        ON_OFF
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        Some(if state.state == "on" { 1.0 } else { 0.0 })
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        let service = if value >= 1.0 { "turn_on" } else { "turn_off" };
        ServiceCall::new(self.kind.domain(), service, entity)
    }

    fn has_slider(&self) -> bool {
        false
    }

    fn format(&self, _value: f64, _range: &Range, _state: &StateSnapshot) -> Option<String> {
        None
    }
}
