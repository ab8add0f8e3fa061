use super::{EntityController, EntityKind, Range};
use crate::command::{ServiceCall, number};
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const POSITION: Range = Range::new(0.0, 100.0, 1.0);

/// Covers (shutters, blinds, windows): position or tilt, in percent open.
#[derive(Debug)]
pub(super) struct CoverController {
    tilt: bool,
}

impl CoverController {
    pub(super) fn build(
        _kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        let tilt = match attribute {
            None | Some("position") => false,
            Some("tilt") => true,
            Some(other) => {
                return Err(ConfigError::UnsupportedAttribute {
                    kind: EntityKind::Cover.domain().to_string(),
                    attribute: other.to_string(),
                });
            }
        };
        Ok(Box::new(Self { tilt }))
    }

    fn attribute(&self) -> &'static str {
        if self.tilt {
            "current_tilt_position"
        } else {
            "current_position"
        }
    }
}

impl EntityController for CoverController {
    fn kind(&self) -> EntityKind {
        EntityKind::Cover
    }

    fn range(&self, _state: &StateSnapshot) -> Range {
        POSITION
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        state.number(self.attribute())
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        if self.tilt {
            ServiceCall::new("cover", "set_cover_tilt_position", entity)
                .with("tilt_position", number(value))
        } else {
            ServiceCall::new("cover", "set_cover_position", entity).with("position", number(value))
        }
    }

    fn off_state(&self) -> Option<&'static str> {
        Some("closed")
    }

    fn has_toggle(&self) -> bool {
        false
    }

    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String> {
        // Covers without position support only report open/closed.
        state.number(self.attribute())?;
        Some(format!("{} %", range.format(value)))
    }
}
