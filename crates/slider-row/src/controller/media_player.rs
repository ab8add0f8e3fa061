use super::registry::no_attribute_modes;
use super::{EntityController, EntityKind, Range};
use crate::command::ServiceCall;
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const VOLUME: Range = Range::new(0.0, 100.0, 1.0);

/// Media players: volume, shown in percent while HA stores `0.0..=1.0`.
#[derive(Debug)]
pub(super) struct MediaPlayerController;

impl MediaPlayerController {
    pub(super) fn build(
        kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        no_attribute_modes(kind, attribute)?;
        Ok(Box::new(Self))
    }
}

impl EntityController for MediaPlayerController {
    fn kind(&self) -> EntityKind {
        EntityKind::MediaPlayer
    }

    fn range(&self, _state: &StateSnapshot) -> Range {
        VOLUME
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        state.number("volume_level").map(|level| level * 100.0)
    }

    fn encode(&self, entity: &EntityId, value: f64, _state: &StateSnapshot) -> ServiceCall {
        ServiceCall::new("media_player", "volume_set", entity).with("volume_level", value / 100.0)
    }

    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String> {
        if state.flag("is_volume_muted") {
            return Some("-".to_string());
        }
        if state.state == "off" {
            return None;
        }
        Some(format!("{} %", range.format(value)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::*;
    use super::*;

    #[test]
    fn test_volume() {
        let mut ctrl = controller("media_player.tv");
        ctrl.bind(Some(StateSnapshot::new("playing").with_attribute("volume_level", 0.35)));
        assert_eq!(ctrl.value(), 35.0);
        assert_eq!(ctrl.display_text(), "35 %");
        let call = ctrl.set_value(50.0);
        assert_eq!(call.service, "volume_set");
        assert_eq!(call.get("volume_level"), Some(&json!(0.5)));
    }

    #[test]
    fn test_muted_and_off() {
        let mut ctrl = controller("media_player.tv");
        ctrl.bind(Some(
            StateSnapshot::new("playing")
                .with_attribute("volume_level", 0.2)
                .with_attribute("is_volume_muted", true),
        ));
        assert_eq!(ctrl.display_text(), "-");
        ctrl.bind(Some(StateSnapshot::new("off")));
        assert!(ctrl.is_off());
        assert_eq!(ctrl.value(), 0.0);
        assert_eq!(ctrl.display_text(), "off");
    }

    #[test]
    fn test_round_trip() {
        let mut ctrl = controller("media_player.tv");
        ctrl.bind(Some(StateSnapshot::new("idle").with_attribute("volume_level", 0.0)));
        for v in 0..=100 {
            let (expected, read_back) = round_trip(&mut ctrl, v as f64);
            assert_eq!(expected, read_back, "volume {v}");
        }
    }
}
