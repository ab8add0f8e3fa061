use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::ServiceCall;
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

/// `input_select` helpers and `select` entities: the slider walks the
/// `options` list, one notch per option.
#[derive(Debug)]
pub(super) struct SelectController {
    kind: EntityKind,
}

impl SelectController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self { kind }))
    }
}

impl EntityController for SelectController {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn range(&self, state: &StateSnapshot) -> Range {
        let options = state.strings("options").len();
        Range::new(0.0, options.saturating_sub(1) as f64, 1.0)
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        state
            .strings("options")
            .iter()
            .position(|option| *option == Some(state.state.as_str()))
            .map(|index| index as f64)
    }

    /// Non-string options are unselectable: landing on one keeps the
    /// current option.
    fn encode(&self, entity: &EntityId, value: f64, state: &StateSnapshot) -> ServiceCall {
        let options = state.strings("options");
        let option = options
            .get(value as usize)
            .copied()
            .flatten()
            .unwrap_or(state.state.as_str());
        ServiceCall::new(self.kind.domain(), "select_option", entity).with("option", option)
    }

    fn off_state(&self) -> Option<&'static str> {
        None
    }

    fn has_toggle(&self) -> bool {
        false
    }

    fn format(&self, _value: f64, _range: &Range, _state: &StateSnapshot) -> Option<String> {
        None
    }
}
