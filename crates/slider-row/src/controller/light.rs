use serde_json::Value;
use strum::EnumString;

use super::{EntityController, EntityKind, Range};
use crate::command::{ServiceCall, number};
use crate::entity::{EntityId, StateSnapshot};
use crate::error::ConfigError;

const BRIGHTNESS: Range = Range::new(0.0, 255.0, 1.0);
const PERCENT: Range = Range::new(0.0, 100.0, 1.0);
const HUE: Range = Range::new(0.0, 360.0, 1.0);
const COLOR_TEMP: Range = Range::new(2000.0, 6500.0, 1.0);

/// Which light attribute the slider drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
enum LightAttribute {
    /// Raw HA brightness, 0..255.
    Brightness,
    /// Brightness in percent, written as `brightness_pct`.
    BrightnessPct,
    /// Color temperature in Kelvin.
    ColorTemp,
    Hue,
    Saturation,
}

#[derive(Debug)]
pub(super) struct LightController {
    attribute: LightAttribute,
}

impl LightController {
    pub(super) fn build(
        _kind: EntityKind,
        attribute: Option<&str>,
    ) -> Result<Box<dyn EntityController>, ConfigError> {
        let attribute = match attribute {
            None => LightAttribute::Brightness,
            Some(name) => name.parse().map_err(|_| ConfigError::UnsupportedAttribute {
                kind: EntityKind::Light.domain().to_string(),
                attribute: name.to_string(),
            })?,
        };
        Ok(Box::new(Self { attribute }))
    }

    fn dims(&self) -> bool {
        matches!(
            self.attribute,
            LightAttribute::Brightness | LightAttribute::BrightnessPct
        )
    }
}

impl EntityController for LightController {
    fn kind(&self) -> EntityKind {
        EntityKind::Light
    }

    fn range(&self, state: &StateSnapshot) -> Range {
        match self.attribute {
            LightAttribute::Brightness => BRIGHTNESS,
            LightAttribute::BrightnessPct | LightAttribute::Saturation => PERCENT,
            LightAttribute::Hue => HUE,
            LightAttribute::ColorTemp => Range::sanitized(
                state
                    .number("min_color_temp_kelvin")
                    .unwrap_or(COLOR_TEMP.min),
                state
                    .number("max_color_temp_kelvin")
                    .unwrap_or(COLOR_TEMP.max),
                COLOR_TEMP.step,
                COLOR_TEMP,
            ),
        }
    }

    fn decode(&self, state: &StateSnapshot) -> Option<f64> {
        // HA drops `brightness` entirely while the light is off.
        if self.dims() && state.state == "off" {
            return Some(0.0);
        }
        match self.attribute {
            LightAttribute::Brightness => state.number("brightness"),
            LightAttribute::BrightnessPct => state.number("brightness").map(|b| b * 100.0 / 255.0),
            LightAttribute::ColorTemp => state.number("color_temp_kelvin"),
            LightAttribute::Hue => state.list_number("hs_color", 0),
            LightAttribute::Saturation => state.list_number("hs_color", 1),
        }
    }

    fn encode(&self, entity: &EntityId, value: f64, state: &StateSnapshot) -> ServiceCall {
        if self.dims() && value == 0.0 {
            return ServiceCall::new("light", "turn_off", entity);
        }
        let call = ServiceCall::new("light", "turn_on", entity);
        match self.attribute {
            LightAttribute::Brightness => call.with("brightness", number(value)),
            LightAttribute::BrightnessPct => call.with("brightness_pct", number(value)),
            LightAttribute::ColorTemp => call.with("color_temp_kelvin", number(value)),
            LightAttribute::Hue => {
                let saturation = state.list_number("hs_color", 1).unwrap_or(PERCENT.max);
                call.with("hs_color", Value::from(vec![number(value), number(saturation)]))
            }
            LightAttribute::Saturation => {
                let hue = state.list_number("hs_color", 0).unwrap_or(HUE.min);
                call.with("hs_color", Value::from(vec![number(hue), number(value)]))
            }
        }
    }

    fn format(&self, value: f64, range: &Range, state: &StateSnapshot) -> Option<String> {
        if state.state == "off" {
            return None;
        }
        let text = match self.attribute {
            LightAttribute::Brightness => format!("{:.0} %", value * 100.0 / BRIGHTNESS.max),
            LightAttribute::BrightnessPct | LightAttribute::Saturation => {
                format!("{} %", range.format(value))
            }
            LightAttribute::ColorTemp => format!("{} K", range.format(value)),
            LightAttribute::Hue => format!("{}°", range.format(value)),
        };
        Some(text)
    }
}
