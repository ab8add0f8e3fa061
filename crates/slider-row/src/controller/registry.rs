use strum::{EnumString, IntoStaticStr, VariantNames};

use super::EntityController;
use super::climate::ClimateController;
use super::cover::CoverController;
use super::fan::FanController;
use super::humidifier::HumidifierController;
use super::light::LightController;
use super::media_player::MediaPlayerController;
use super::number::NumberController;
use super::select::SelectController;
use super::switch::SwitchController;
use crate::error::ConfigError;

/// Entity kinds (Home Assistant domains) a slider row can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Light,
    Cover,
    Fan,
    Climate,
    WaterHeater,
    Humidifier,
    MediaPlayer,
    InputNumber,
    Number,
    InputSelect,
    Select,
    Switch,
    InputBoolean,
    Automation,
}

impl EntityKind {
    /// The service domain writes for this kind go to.
    pub fn domain(self) -> &'static str {
        self.into()
    }
}

/// Builds a kind's controller, given the row's `attribute` mode (if any).
pub type ControllerFactory =
    fn(EntityKind, Option<&str>) -> Result<Box<dyn EntityController>, ConfigError>;

/// Look up the controller factory for an entity kind.
pub fn resolve(kind: &str) -> Result<(EntityKind, ControllerFactory), ConfigError> {
    let parsed: EntityKind = kind
        .parse()
        .map_err(|_| ConfigError::UnsupportedKind(kind.to_string()))?;
    let factory: ControllerFactory = match parsed {
        EntityKind::Light => LightController::build,
        EntityKind::Cover => CoverController::build,
        EntityKind::Fan => FanController::build,
        EntityKind::Climate | EntityKind::WaterHeater => ClimateController::build,
        EntityKind::Humidifier => HumidifierController::build,
        EntityKind::MediaPlayer => MediaPlayerController::build,
        EntityKind::InputNumber | EntityKind::Number => NumberController::build,
        EntityKind::InputSelect | EntityKind::Select => SelectController::build,
        EntityKind::Switch | EntityKind::InputBoolean | EntityKind::Automation => {
            SwitchController::build
        }
    };
    Ok((parsed, factory))
}

/// Reject an `attribute` option for kinds that only drive one attribute.
pub(super) fn no_attribute_modes(
    kind: EntityKind,
    attribute: Option<&str>,
) -> Result<(), ConfigError> {
    match attribute {
        None => Ok(()),
        Some(attribute) => Err(ConfigError::UnsupportedAttribute {
            kind: kind.domain().to_string(),
            attribute: attribute.to_string(),
        }),
    }
}
