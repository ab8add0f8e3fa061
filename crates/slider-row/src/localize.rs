use crate::render::Direction;

/// Shown instead of the row when the configured entity does not exist.
/// Takes the `entity` argument.
pub const ENTITY_NOT_FOUND: &str = "ui.panel.lovelace.warning.entity_not_found";

/// The value label of an unavailable entity.
pub const STATE_UNAVAILABLE: &str = "state.default.unavailable";

/// The host's translation service (`hass.localize`).
pub trait Localizer {
    /// Translate `key`, substituting named `args` (`{entity}` and the like).
    fn localize(&self, key: &str, args: &[(&str, &str)]) -> String;

    /// Writing direction of the active language.
    fn direction(&self) -> Direction {
        Direction::Ltr
    }
}

/// Built-in English strings for hosts without a translation service.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn localize(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = match key {
            ENTITY_NOT_FOUND => "Entity not available: {entity}",
            STATE_UNAVAILABLE => "Unavailable",
            other => other,
        };
        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}
